//! # Sequential Graph Coloring
//!
//! Bit-parallel greedy (first-fit) proper vertex coloring for undirected
//! graphs and induced subgraphs of them.
//!
//! This crate provides:
//! - A packed-word [`bitset::BitSet`] over a fixed vertex universe, with the
//!   block-restricted probe and erase operations the engines build on.
//! - A [`graph::Graph`] storing one neighbor bit row per vertex, with text
//!   adjacency-matrix I/O and G(n, p) random generation.
//! - Two coloring engines: [`coloring::ColorClasses`] (first-fit over
//!   per-color bit sets, hard color budget) and [`coloring::IsetColoring`]
//!   (repeated maximal-independent-set extraction, two working bit sets).
//! - A slow, obviously correct [`validate::verify_coloring`] cross-check.
//!
//! Neither engine guarantees an optimal coloring; both guarantee a proper
//! one.
//!
//! ## Quick Start
//!
//! ```
//! use seqcolor::coloring::{ColorClasses, IsetColoring};
//! use seqcolor::graph::Graph;
//!
//! // Path 0-1-2-3 with the chord 1-3, plus an isolated vertex.
//! let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (1, 3)]);
//!
//! let mut classes = ColorClasses::new(&g, g.order());
//! assert_eq!(classes.color_graph(), 3);
//! assert_eq!(classes.colors(), &[1, 2, 1, 3, 1]);
//!
//! // The independent-set engine reaches the same coloring here.
//! let mut iset = IsetColoring::new(&g);
//! assert_eq!(iset.color_graph(), 3);
//! assert_eq!(iset.color(3), 3);
//! ```
//!
//! ## Coloring a Subset
//!
//! ```
//! use seqcolor::bitset::BitSet;
//! use seqcolor::coloring::IsetColoring;
//! use seqcolor::graph::Graph;
//!
//! let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (1, 3)]);
//! let mut engine = IsetColoring::new(&g);
//!
//! // Only the masked vertices are colored; edge 1-2 forces two colors.
//! let mask = BitSet::from_members(5, &[1, 2, 4]);
//! assert_eq!(engine.color_subset(&mask), 2);
//! assert_eq!(engine.color(0), 0);
//! ```
//!
//! ## Modules
//!
//! - [`bitset`]: Fixed-universe packed bit sets with cursor and destructive scans.
//! - [`graph`]: Graph storage, random generation, adjacency-matrix parsing.
//! - [`coloring`]: The two greedy coloring engines.
//! - [`validate`]: Deterministic validation of produced colorings.
//!
//! ## Performance Notes
//!
//! - Conflict tests and neighbor pruning are word-level operations; a probe
//!   touches at most `n / 64 + 1` words.
//! - Vertices are processed in ascending index order, which lets the class
//!   probe stop at the current vertex's storage word and the
//!   independent-set erasure start there.
//! - For maximum performance, compile with: `RUSTFLAGS="-C target-cpu=native" cargo build --release`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)] // G(n, p) and friends in docs
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod bitset;
pub mod coloring;
pub mod graph;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::bitset::BitSet;
    pub use crate::coloring::{ColorClasses, IsetColoring};
    pub use crate::graph::{parse_adjacency_matrix, Graph, GraphParseError};
    pub use crate::validate::{verify_coloring, ColoringError};
}
