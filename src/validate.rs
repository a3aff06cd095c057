//! Deterministic validation of per-vertex color assignments.
//!
//! The engines are trusted to be fast; this module is the slow, obviously
//! correct cross-check used by tests and the CLI before results are
//! reported.

use std::fmt;

use crate::bitset::BitSet;
use crate::graph::Graph;

// ============================================================================
// Public API
// ============================================================================

/// Ways a color assignment can fail validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColoringError {
    /// Two adjacent selected vertices share a color.
    Conflict {
        /// Lower endpoint of the offending edge.
        u: usize,
        /// Upper endpoint of the offending edge.
        v: usize,
        /// The color both endpoints carry.
        color: usize,
    },
    /// A selected vertex carries the uncolored sentinel.
    Uncolored {
        /// The vertex left uncolored.
        vertex: usize,
    },
    /// A color below the maximum is used by no selected vertex.
    Gap {
        /// The unused color.
        color: usize,
        /// Highest color in use.
        max_color: usize,
    },
}

impl fmt::Display for ColoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColoringError::Conflict { u, v, color } => {
                write!(f, "adjacent vertices {u} and {v} both have color {color}")
            }
            ColoringError::Uncolored { vertex } => {
                write!(f, "vertex {vertex} is uncolored")
            }
            ColoringError::Gap { color, max_color } => {
                write!(f, "color {color} is unused although {max_color} colors appear")
            }
        }
    }
}

impl std::error::Error for ColoringError {}

/// Checks that `colors` is a proper, complete, contiguous coloring of the
/// vertices selected by `subset` (all vertices when `None`).
///
/// Checked properties:
/// * every selected vertex has a nonzero color;
/// * no edge with both endpoints selected joins two vertices of the same
///   color (edges leaving the selection are ignored);
/// * the colors appearing in the selection form a contiguous range
///   starting at 1.
///
/// # Errors
///
/// Returns the first violated property.
pub fn verify_coloring(
    graph: &Graph,
    colors: &[usize],
    subset: Option<&BitSet>,
) -> Result<(), ColoringError> {
    debug_assert_eq!(colors.len(), graph.order(), "color slice length mismatch");

    let mut work = match subset {
        Some(mask) => mask.clone(),
        None => BitSet::new_filled(graph.order()),
    };

    let mut seen = Vec::new();
    let mut max_color = 0;
    while let Some(v) = work.pop_first() {
        let c = colors[v];
        if c == 0 {
            return Err(ColoringError::Uncolored { vertex: v });
        }
        max_color = max_color.max(c);
        seen.push(v);

        for w in graph.neighbors(v) {
            if w > v && colors[w] == c && subset.is_none_or(|mask| mask.contains(w)) {
                return Err(ColoringError::Conflict { u: v, v: w, color: c });
            }
        }
    }

    let mut used = vec![false; max_color + 1];
    for &v in &seen {
        used[colors[v]] = true;
    }
    for c in 1..=max_color {
        if !used[c] {
            return Err(ColoringError::Gap { color: c, max_color });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
