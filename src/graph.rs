//! GraphModel: read-only petgraph view over a node/edge snapshot.
//!
//! Node `i` of the input slice becomes `NodeIndex(i)`, so every lookup can
//! go back to the caller's sequence without cloning. Edges whose source or
//! target id names no node are dropped here and never reach the cycle check
//! or the layout.

use std::collections::HashMap;

use petgraph::Direction as EdgeDir;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::model::{Edge, Node};

/// Directed adjacency built for one validate/layout call.
///
/// Node weights are positions in the input node slice; edge weights are
/// positions in the input edge slice.
pub struct GraphModel<'a> {
    pub digraph: DiGraph<usize, usize>,
    /// Maps node id → petgraph NodeIndex. The first node wins on duplicate ids.
    pub node_index: HashMap<&'a str, NodeIndex>,
    nodes: &'a [Node],
    edges: &'a [Edge],
    dangling: usize,
}

impl<'a> GraphModel<'a> {
    pub fn new(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut digraph: DiGraph<usize, usize> =
            DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_index: HashMap<&'a str, NodeIndex> = HashMap::with_capacity(nodes.len());

        for (i, node) in nodes.iter().enumerate() {
            let idx = digraph.add_node(i);
            node_index.entry(node.id.as_str()).or_insert(idx);
        }

        let mut dangling = 0;
        for (i, edge) in edges.iter().enumerate() {
            match (
                node_index.get(edge.source.as_str()),
                node_index.get(edge.target.as_str()),
            ) {
                (Some(&from), Some(&to)) => {
                    digraph.add_edge(from, to, i);
                }
                _ => dangling += 1,
            }
        }

        Self {
            digraph,
            node_index,
            nodes,
            edges,
            dangling,
        }
    }

    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    pub fn edges(&self) -> &'a [Edge] {
        self.edges
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    /// Number of edges that made it into the adjacency.
    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    /// Number of edges dropped because an endpoint is missing.
    pub fn dangling_edge_count(&self) -> usize {
        self.dangling
    }

    /// Position of the node with this id in the input slice.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).map(|idx| idx.index())
    }

    /// Targets of `node`'s outgoing edges, in edge input order. Parallel
    /// edges appear once per edge.
    pub fn successors(&self, node: usize) -> Vec<usize> {
        self.neighbours(node, EdgeDir::Outgoing)
    }

    /// Sources of `node`'s incoming edges, in edge input order.
    pub fn predecessors(&self, node: usize) -> Vec<usize> {
        self.neighbours(node, EdgeDir::Incoming)
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.digraph
            .edges_directed(NodeIndex::new(node), EdgeDir::Incoming)
            .count()
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.digraph
            .edges_directed(NodeIndex::new(node), EdgeDir::Outgoing)
            .count()
    }

    /// Petgraph's own acyclicity test. Self-loops count as cycles.
    pub fn is_dag(&self) -> bool {
        !is_cyclic_directed(&self.digraph)
    }

    fn neighbours(&self, node: usize, dir: EdgeDir) -> Vec<usize> {
        if node >= self.digraph.node_count() {
            return Vec::new();
        }
        let mut found: Vec<(usize, usize)> = self
            .digraph
            .edges_directed(NodeIndex::new(node), dir)
            .map(|e| {
                let other = match dir {
                    EdgeDir::Outgoing => e.target(),
                    EdgeDir::Incoming => e.source(),
                };
                (*e.weight(), other.index())
            })
            .collect();
        found.sort_unstable();
        found.into_iter().map(|(_, n)| n).collect()
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_graph.rs"]
mod tests;
