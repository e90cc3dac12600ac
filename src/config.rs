//! Configuration for the layout engine.
//!
//! Defaults match the spacing the editor's auto-arrange button has always
//! used (160×80 boxes, 80px between siblings, 120px between ranks, 20px
//! margins). Every field can be set from a TOML file:
//!
//! ```toml
//! node-width = 200
//! rank-separation = 90
//! direction = "LR"
//! rank-align = "center"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─── Direction ───────────────────────────────────────────────────────────────

/// Flow direction of the ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ranks stacked downwards; siblings spread along x.
    #[default]
    #[serde(rename = "TB", alias = "TD")]
    TopToBottom,
    /// Ranks stacked rightwards; siblings spread along y.
    #[serde(rename = "LR")]
    LeftToRight,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftToRight)
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TB" | "TD" => Ok(Direction::TopToBottom),
            "LR" => Ok(Direction::LeftToRight),
            other => Err(Error::InvalidConfig {
                field: "direction",
                reason: format!("'{other}' is not supported; use TB or LR"),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopToBottom => f.write_str("TB"),
            Direction::LeftToRight => f.write_str("LR"),
        }
    }
}

// ─── RankAlign ───────────────────────────────────────────────────────────────

/// How a rank narrower than the widest one is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankAlign {
    #[default]
    Left,
    Center,
}

// ─── LayoutConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LayoutConfig {
    /// Width of every node box.
    pub node_width: f64,
    /// Height of every node box.
    pub node_height: f64,
    /// Gap between neighbouring boxes of the same rank.
    pub node_separation: f64,
    /// Gap between consecutive ranks.
    pub rank_separation: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub direction: Direction,
    /// Barycenter sweeps run by crossing reduction.
    pub ordering_passes: usize,
    pub rank_align: RankAlign,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 80.0,
            node_separation: 80.0,
            rank_separation: 120.0,
            margin_x: 20.0,
            margin_y: 20.0,
            direction: Direction::TopToBottom,
            ordering_passes: 4,
            rank_align: RankAlign::Left,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    /// Distance between the origins of two consecutive ranks.
    pub fn rank_step(&self) -> f64 {
        match self.direction {
            Direction::TopToBottom => self.node_height + self.rank_separation,
            Direction::LeftToRight => self.node_width + self.rank_separation,
        }
    }

    /// Distance between the origins of two neighbours in one rank.
    pub fn order_step(&self) -> f64 {
        match self.direction {
            Direction::TopToBottom => self.node_width + self.node_separation,
            Direction::LeftToRight => self.node_height + self.node_separation,
        }
    }

    /// Reject sizes that would make boxes overlap or coordinates non-finite.
    pub fn validate(&self) -> Result<()> {
        positive("node-width", self.node_width)?;
        positive("node-height", self.node_height)?;
        non_negative("node-separation", self.node_separation)?;
        non_negative("rank-separation", self.rank_separation)?;
        non_negative("margin-x", self.margin_x)?;
        non_negative("margin-y", self.margin_y)?;
        if self.ordering_passes == 0 {
            return Err(Error::InvalidConfig {
                field: "ordering-passes",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: format!("must be zero or more, got {value}"),
        })
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
