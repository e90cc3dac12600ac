//! Sugiyama layered graph layout algorithm.
//!
//! Phases:
//!   1. Rank assignment (longest path, Kahn order)
//!   2. Crossing minimisation (barycenter sweeps)
//!   3. Coordinate assignment
//!
//! Nodes are handled by their position in the input sequence, and every
//! per-rank list is kept in a deterministic order, so identical input always
//! yields identical coordinates.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::types::{LayoutNode, LayoutResult};
use crate::config::{Direction, LayoutConfig, RankAlign};
use crate::graph::GraphModel;

// ─── Adjacency ───────────────────────────────────────────────────────────────

/// Successor and predecessor lists for every node, self-loops removed.
pub struct Adjacency {
    pub successors: Vec<Vec<usize>>,
    pub predecessors: Vec<Vec<usize>>,
}

impl Adjacency {
    pub fn from_graph(graph: &GraphModel<'_>) -> Self {
        let n = graph.node_count();
        let strip = |node: usize, list: Vec<usize>| -> Vec<usize> {
            list.into_iter().filter(|&other| other != node).collect()
        };
        Self {
            successors: (0..n).map(|i| strip(i, graph.successors(i))).collect(),
            predecessors: (0..n).map(|i| strip(i, graph.predecessors(i))).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }
}

// ─── Rank Assignment ─────────────────────────────────────────────────────────

pub struct RankAssignment {
    /// Rank of each node, indexed by input position.
    pub ranks: Vec<usize>,
    pub rank_count: usize,
    /// Edges that pointed at an already placed node and were not relaxed.
    pub back_edges: usize,
    /// Times the queue ran dry and a node had to be taken out of turn.
    pub forced: usize,
}

impl RankAssignment {
    /// Longest-path ranking.
    ///
    /// Sources are queued in input order. If the queue drains while nodes are
    /// left (they sit on a cycle, or below one), the first unvisited node in
    /// input order is taken next. Each node is visited once, so cyclic input
    /// terminates; its ranks are just not guaranteed to follow every edge.
    pub fn assign(adj: &Adjacency) -> Self {
        let n = adj.node_count();
        let mut ranks = vec![0usize; n];
        let mut visited = vec![false; n];
        let mut waiting: Vec<usize> = adj.predecessors.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| waiting[i] == 0).collect();
        let mut cursor = 0;
        let mut back_edges = 0;
        let mut forced = 0;

        loop {
            let node = match queue.pop_front() {
                Some(node) => node,
                None => {
                    while cursor < n && visited[cursor] {
                        cursor += 1;
                    }
                    if cursor == n {
                        break;
                    }
                    forced += 1;
                    cursor
                }
            };
            if visited[node] {
                continue;
            }
            visited[node] = true;

            for &succ in &adj.successors[node] {
                if visited[succ] {
                    back_edges += 1;
                    continue;
                }
                ranks[succ] = ranks[succ].max(ranks[node] + 1);
                waiting[succ] -= 1;
                if waiting[succ] == 0 {
                    queue.push_back(succ);
                }
            }
        }

        let rank_count = ranks.iter().copied().max().map_or(0, |m| m + 1);
        Self {
            ranks,
            rank_count,
            back_edges,
            forced,
        }
    }

    /// Node lists per rank, each in input order.
    pub fn group_by_rank(&self) -> Vec<Vec<usize>> {
        let mut ordering: Vec<Vec<usize>> = vec![Vec::new(); self.rank_count];
        for (node, &rank) in self.ranks.iter().enumerate() {
            ordering[rank].push(node);
        }
        ordering
    }
}

// ─── Crossing Minimization ───────────────────────────────────────────────────

/// Mean order index of the neighbours that sit in rank `adjacent`.
fn barycenter(neighbours: &[usize], ranks: &[usize], adjacent: usize, position: &[usize]) -> Option<f64> {
    let placed: Vec<f64> = neighbours
        .iter()
        .filter(|&&nb| ranks[nb] == adjacent)
        .map(|&nb| position[nb] as f64)
        .collect();
    if placed.is_empty() {
        None
    } else {
        Some(placed.iter().sum::<f64>() / placed.len() as f64)
    }
}

/// Re-sort one rank by barycenter. Nodes with no neighbour in the adjacent
/// rank keep their current index as key; ties go to the earlier index.
fn sweep_rank(
    layer: &mut [usize],
    neighbours: &[Vec<usize>],
    ranks: &[usize],
    adjacent: usize,
    position: &mut [usize],
) {
    let mut keyed: Vec<(f64, usize, usize)> = layer
        .iter()
        .map(|&node| {
            let key = barycenter(&neighbours[node], ranks, adjacent, position)
                .unwrap_or(position[node] as f64);
            (key, position[node], node)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    for (order, &(_, _, node)) in keyed.iter().enumerate() {
        layer[order] = node;
        position[node] = order;
    }
}

/// Order each rank to reduce crossings.
///
/// Even passes sweep top-down against predecessors, odd passes bottom-up
/// against successors. Exactly `passes` sweeps run; there is no early exit.
pub fn minimise_crossings(adj: &Adjacency, ra: &RankAssignment, passes: usize) -> Vec<Vec<usize>> {
    let mut ordering = ra.group_by_rank();
    let mut position = vec![0usize; adj.node_count()];
    for layer in &ordering {
        for (order, &node) in layer.iter().enumerate() {
            position[node] = order;
        }
    }

    let rank_count = ordering.len();
    for pass in 0..passes {
        if pass % 2 == 0 {
            for rank in 1..rank_count {
                sweep_rank(&mut ordering[rank], &adj.predecessors, &ra.ranks, rank - 1, &mut position);
            }
        } else {
            for rank in (0..rank_count.saturating_sub(1)).rev() {
                sweep_rank(&mut ordering[rank], &adj.successors, &ra.ranks, rank + 1, &mut position);
            }
        }
        trace!(pass, crossings = count_crossings(&ordering, adj, &ra.ranks), "ordering pass");
    }

    ordering
}

/// Count pairwise crossings among edges joining consecutive ranks.
///
/// Edges of each rank pair are sorted by (source order, target order); the
/// crossings are then the strict inversions of the target sequence, counted
/// with a Fenwick tree.
pub fn count_crossings(ordering: &[Vec<usize>], adj: &Adjacency, ranks: &[usize]) -> usize {
    let mut position = vec![0usize; adj.node_count()];
    for layer in ordering {
        for (order, &node) in layer.iter().enumerate() {
            position[node] = order;
        }
    }

    let mut total = 0usize;
    for rank in 0..ordering.len().saturating_sub(1) {
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for &src in &ordering[rank] {
            for &tgt in &adj.successors[src] {
                if ranks[tgt] == rank + 1 {
                    edges.push((position[src], position[tgt]));
                }
            }
        }
        edges.sort_unstable();

        let width = ordering[rank + 1].len();
        let mut tree = vec![0usize; width + 1];
        for (seen, &(_, tgt)) in edges.iter().enumerate() {
            // Earlier edges with target order <= tgt do not cross this one.
            let mut not_crossing = 0;
            let mut i = tgt + 1;
            while i > 0 {
                not_crossing += tree[i];
                i &= i - 1;
            }
            total += seen - not_crossing;

            let mut i = tgt + 1;
            while i <= width {
                tree[i] += 1;
                i += i & i.wrapping_neg();
            }
        }
    }
    total
}

// ─── Coordinate Assignment ───────────────────────────────────────────────────

/// Place every node from its (rank, order).
///
/// Top-to-bottom: rank drives y, order drives x. Left-to-right swaps the
/// axes. Ranks are left-aligned unless `rank_align` is `Center`, which shifts
/// each rank by half its shortfall against the widest rank.
pub fn assign_coordinates(
    graph: &GraphModel<'_>,
    ordering: &[Vec<usize>],
    config: &LayoutConfig,
) -> Vec<LayoutNode> {
    let rank_step = config.rank_step();
    let order_step = config.order_step();
    let widest = ordering.iter().map(Vec::len).max().unwrap_or(0);

    let mut placed: Vec<Option<LayoutNode>> = vec![None; graph.node_count()];
    for (rank, layer) in ordering.iter().enumerate() {
        let offset = match config.rank_align {
            RankAlign::Left => 0.0,
            RankAlign::Center => (widest - layer.len()) as f64 * order_step / 2.0,
        };
        for (order, &node) in layer.iter().enumerate() {
            let along = offset + order as f64 * order_step;
            let across = rank as f64 * rank_step;
            let (x, y) = match config.direction {
                Direction::TopToBottom => (config.margin_x + along, config.margin_y + across),
                Direction::LeftToRight => (config.margin_x + across, config.margin_y + along),
            };
            let mut ln = LayoutNode::new(node, graph.nodes()[node].id.clone(), rank, order);
            ln.x = x;
            ln.y = y;
            placed[node] = Some(ln);
        }
    }

    placed.into_iter().flatten().collect()
}

// ─── SugiyamaLayout Engine ───────────────────────────────────────────────────

/// Sugiyama layered layout engine.
pub struct SugiyamaLayout;

impl SugiyamaLayout {
    /// Run rank assignment, crossing minimisation and coordinate assignment.
    pub fn layout(graph: &GraphModel<'_>, config: &LayoutConfig) -> LayoutResult {
        if graph.node_count() == 0 {
            return LayoutResult::new(config.direction);
        }

        let adj = Adjacency::from_graph(graph);
        let ra = RankAssignment::assign(&adj);
        if ra.back_edges > 0 {
            debug!(
                back_edges = ra.back_edges,
                forced = ra.forced,
                "graph is cyclic, ranks may not follow every edge"
            );
        }

        let ordering = minimise_crossings(&adj, &ra, config.ordering_passes);
        let crossings = count_crossings(&ordering, &adj, &ra.ranks);
        let nodes = assign_coordinates(graph, &ordering, config);

        LayoutResult {
            nodes,
            rank_count: ra.rank_count,
            crossings,
            direction: config.direction,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_sugiyama.rs"]
mod tests;
