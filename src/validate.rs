//! DAG validation: the structural rules a pipeline must satisfy to run.
//!
//! Four checks run in a fixed order and never short-circuit:
//!
//! 1. at least two nodes,
//! 2. every node touches an edge,
//! 3. no directed cycle,
//! 4. no edge from a node to itself.
//!
//! A self-loop is also a cycle of length one, so it trips both 3 and 4.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::GraphModel;
use crate::model::{Edge, Node};

/// Smallest node count a pipeline may have.
pub const MIN_NODES: usize = 2;

// ─── Violations ──────────────────────────────────────────────────────────────

/// Broad category of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    Cardinality,
    Connectivity,
    Structural,
}

/// One broken rule. `Display` gives the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum Violation {
    #[error("Pipeline must have at least 2 nodes")]
    TooFewNodes,
    #[error("{count} node(s) are not connected")]
    Disconnected { count: usize },
    #[error("Pipeline contains cycles (not a valid DAG)")]
    Cycle,
    #[error("Self-connections are not allowed")]
    SelfLoop,
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::TooFewNodes => ViolationKind::Cardinality,
            Violation::Disconnected { .. } => ViolationKind::Connectivity,
            Violation::Cycle | Violation::SelfLoop => ViolationKind::Structural,
        }
    }
}

// ─── ValidationResult ────────────────────────────────────────────────────────

/// Outcome of [`validate`]. Serialises as `{ "isValid": .., "errors": [..] }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// User-facing messages, in check order.
    pub errors: Vec<String>,
    #[serde(skip)]
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            errors: violations.iter().map(ToString::to_string).collect(),
            violations,
        }
    }

    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind() == kind)
    }
}

// ─── Checks ──────────────────────────────────────────────────────────────────

/// Run every check over a node/edge snapshot.
///
/// Total and deterministic: malformed input (dangling edge endpoints,
/// repeated ids) is tolerated and only affects the counts it touches.
#[instrument(level = "debug", skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
pub fn validate(nodes: &[Node], edges: &[Edge]) -> ValidationResult {
    let mut violations: Vec<Violation> = Vec::new();

    if nodes.len() < MIN_NODES {
        violations.push(Violation::TooFewNodes);
    }

    let count = count_disconnected(nodes, edges);
    if count > 0 {
        violations.push(Violation::Disconnected { count });
    }

    let graph = GraphModel::new(nodes, edges);
    if graph.dangling_edge_count() > 0 {
        debug!(
            dangling = graph.dangling_edge_count(),
            "ignoring edges with unknown endpoints"
        );
    }
    if has_cycle(&graph) {
        violations.push(Violation::Cycle);
    }

    if edges.iter().any(Edge::is_self_loop) {
        violations.push(Violation::SelfLoop);
    }

    debug!(violations = violations.len(), "validation finished");
    ValidationResult::from_violations(violations)
}

/// Nodes whose id is neither the source nor the target of any edge.
pub fn count_disconnected(nodes: &[Node], edges: &[Edge]) -> usize {
    let touched: HashSet<&str> = edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .collect();
    nodes
        .iter()
        .filter(|n| !touched.contains(n.id.as_str()))
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

struct Frame {
    node: usize,
    successors: Vec<usize>,
    next: usize,
}

/// Depth-first search with an explicit stack, so long chains cannot exhaust
/// the thread stack. Every unvisited node is used as a root.
pub fn has_cycle(graph: &GraphModel<'_>) -> bool {
    let mut marks = vec![Mark::Unvisited; graph.node_count()];

    for root in 0..graph.node_count() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::OnStack;
        let mut stack = vec![Frame {
            node: root,
            successors: graph.successors(root),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            match frame.successors.get(frame.next).copied() {
                Some(succ) => {
                    frame.next += 1;
                    match marks[succ] {
                        Mark::OnStack => return true,
                        Mark::Done => {}
                        Mark::Unvisited => {
                            marks[succ] = Mark::OnStack;
                            stack.push(Frame {
                                node: succ,
                                successors: graph.successors(succ),
                                next: 0,
                            });
                        }
                    }
                }
                None => {
                    let node = frame.node;
                    stack.pop();
                    marks[node] = Mark::Done;
                }
            }
        }
    }

    false
}

#[cfg(test)]
#[path = "../tests/rust/test_validate.rs"]
mod tests;
