//! pipeline-dag: DAG validation and layered auto-layout for pipeline diagrams.
//!
//! Public API:
//!   - [`validate()`] checks the structural rules of a node/edge snapshot,
//!   - [`layout()`] computes fresh positions for every node,
//!   - [`connection_point()`] / [`edge_path()`] give renderers edge geometry.
//!
//! All four are pure functions of their arguments.

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod model;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{Direction, LayoutConfig, RankAlign};
pub use error::{Error, Result};
pub use geometry::{CubicCurve, Point, Side, connection_point, distance, edge_path};
pub use layout::{LayoutResult, full_layout, layout};
pub use model::{Edge, Node, Pipeline, Position};
pub use validate::{ValidationResult, Violation, ViolationKind, validate};

impl Pipeline {
    /// Validate this pipeline. See [`validate()`].
    pub fn validate(&self) -> ValidationResult {
        validate::validate(&self.nodes, &self.edges)
    }

    /// A copy of this pipeline with auto-arranged node positions.
    pub fn arranged(&self, config: &LayoutConfig) -> Pipeline {
        Pipeline {
            nodes: layout::layout(&self.nodes, &self.edges, config),
            edges: self.edges.clone(),
        }
    }
}
