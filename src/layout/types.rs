//! Layout types: LayoutNode, LayoutResult.

use serde::Serialize;

use crate::config::Direction;
use crate::model::{Node, Position};

// ─── LayoutNode ───────────────────────────────────────────────────────────────

/// A node with its computed rank, in-rank order and box origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    /// Position in the input node sequence.
    pub index: usize,
    pub id: String,
    pub rank: usize,
    pub order: usize,
    pub x: f64,
    pub y: f64,
}

impl LayoutNode {
    pub fn new(index: usize, id: impl Into<String>, rank: usize, order: usize) -> Self {
        Self {
            index,
            id: id.into(),
            rank,
            order,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

// ─── LayoutResult ─────────────────────────────────────────────────────────────

/// Full output of the layout pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    /// One entry per input node, in input order.
    pub nodes: Vec<LayoutNode>,
    pub rank_count: usize,
    /// Edge crossings between adjacent ranks in the final ordering.
    pub crossings: usize,
    pub direction: Direction,
}

impl LayoutResult {
    pub fn new(direction: Direction) -> Self {
        Self {
            nodes: Vec::new(),
            rank_count: 0,
            crossings: 0,
            direction,
        }
    }

    pub fn get(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of the nodes in `rank`, left to right (top to bottom for LR).
    pub fn rank_members(&self, rank: usize) -> Vec<&str> {
        let mut members: Vec<&LayoutNode> = self.nodes.iter().filter(|n| n.rank == rank).collect();
        members.sort_by_key(|n| n.order);
        members.into_iter().map(|n| n.id.as_str()).collect()
    }

    /// Copy `nodes` with the computed positions; `nodes` must be the
    /// sequence this result was computed from.
    pub fn apply(&self, nodes: &[Node]) -> Vec<Node> {
        nodes
            .iter()
            .zip(&self.nodes)
            .map(|(node, placed)| node.with_position(placed.position()))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
