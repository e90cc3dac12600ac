//! Pipeline data model: Position, Node, Edge, Pipeline.
//!
//! These are the interchange types shared with the editor. Their JSON shape
//! is the editor's import/export format:
//!
//! ```text
//! Node:     { id, label, position: { x, y }, selected }
//! Edge:     { id, source, target, selected }
//! Pipeline: { nodes: Node[], edges: Edge[] }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

// ─── Position ────────────────────────────────────────────────────────────────

/// Top-left corner of a node box, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ─── Node ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Opaque identifier. Expected unique, never checked.
    pub id: String,
    pub label: String,
    pub position: Position,
    /// Editor selection flag. Carried through untouched.
    #[serde(default)]
    pub selected: bool,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position: Position::new(x, y),
            selected: false,
        }
    }

    /// Create a bare node at the origin (label = id).
    pub fn bare(id: impl Into<String>) -> Self {
        let id = id.into();
        let label = id.clone();
        Self::new(id, label, 0.0, 0.0)
    }

    /// Copy of this node moved to `position`; every other field is kept.
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

// ─── Edge ────────────────────────────────────────────────────────────────────

/// Directed dependency `source → target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    /// Id of the upstream node.
    pub source: String,
    /// Id of the downstream node.
    pub target: String,
    #[serde(default)]
    pub selected: bool,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            selected: false,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// A node/edge snapshot taken from the editor for a single call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Pipeline {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Parse the editor's JSON export format.
    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    /// Serialise with two-space indentation, as the editor exports it.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The five-node demo pipeline the editor offers as a starting point.
    ///
    /// ```text
    /// Data Source ──► Transform ──► Aggregate ──► Output
    ///      └────────► Filter ───────────┘
    /// ```
    pub fn sample() -> Self {
        let nodes = vec![
            Node::new("1", "Data Source", 100.0, 200.0),
            Node::new("2", "Transform", 400.0, 150.0),
            Node::new("3", "Filter", 400.0, 250.0),
            Node::new("4", "Aggregate", 700.0, 200.0),
            Node::new("5", "Output", 1000.0, 200.0),
        ];
        let edges = vec![
            Edge::new("e1", "1", "2"),
            Edge::new("e2", "1", "3"),
            Edge::new("e3", "2", "4"),
            Edge::new("e4", "3", "4"),
            Edge::new("e5", "4", "5"),
        ];
        Self { nodes, edges }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_model.rs"]
mod tests;
