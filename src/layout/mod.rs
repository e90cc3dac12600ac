//! Layout engine: convenience API for auto-arranging a pipeline.

pub mod sugiyama;
pub mod types;

pub use sugiyama::SugiyamaLayout;
pub use types::{LayoutNode, LayoutResult};

use tracing::{debug, instrument};

use crate::config::LayoutConfig;
use crate::graph::GraphModel;
use crate::model::{Edge, Node};

/// Run the full layout pipeline and return rank/order/coordinates per node.
#[instrument(level = "debug", skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
pub fn full_layout(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> LayoutResult {
    let graph = GraphModel::new(nodes, edges);
    let result = SugiyamaLayout::layout(&graph, config);
    debug!(
        ranks = result.rank_count,
        crossings = result.crossings,
        "layout finished"
    );
    result
}

/// Return a copy of `nodes` with freshly computed positions.
///
/// Ids, labels and selection flags are carried over unchanged and the
/// output keeps the input order. Inputs are not modified.
pub fn layout(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> Vec<Node> {
    full_layout(nodes, edges, config).apply(nodes)
}
