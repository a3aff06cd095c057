//! Undirected graph backed by one adjacency [`BitSet`] row per vertex.
//!
//! The row layout is what makes the coloring engines bit-parallel: testing
//! a vertex against a color class and pruning neighbors out of a candidate
//! set are both word-wise operations against `neighbors(v)`.
//!
//! Graphs can be built programmatically, generated at random, or exchanged
//! as text adjacency matrices (one row of `0`/`1` characters per line).

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rand::Rng;

use crate::bitset::BitSet;

/// Simple undirected graph with no self-loops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    adj: Vec<BitSet>,
    num_edges: usize,
}

impl Graph {
    /// Creates an edgeless graph on `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            adj: (0..n).map(|_| BitSet::new_empty(n)).collect(),
            num_edges: 0,
        }
    }

    /// Creates a graph on `n` vertices from an edge list.
    ///
    /// # Panics
    ///
    /// Panics if any endpoint is out of range or any edge is a self-loop.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut g = Self::new(n);
        for &(u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    /// Samples a G(n, p) random graph: each of the `n * (n - 1) / 2`
    /// possible edges is present independently with probability `p`.
    pub fn new_random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&p), "edge probability {p} outside [0, 1]");
        let mut g = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) {
                    g.add_edge(i, j);
                }
            }
        }
        g
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges.
    #[inline(always)]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Inserts the undirected edge `{u, v}`. Re-inserting an existing edge
    /// is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is out of range or `u == v`.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(
            u < self.order() && v < self.order(),
            "edge ({u}, {v}) outside a graph of order {}",
            self.order()
        );
        assert!(u != v, "self-loop at vertex {u}");
        if !self.adj[u].contains(v) {
            self.adj[u].set_bit(v);
            self.adj[v].set_bit(u);
            self.num_edges += 1;
        }
    }

    /// Returns whether `{u, v}` is an edge.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u].contains(v)
    }

    /// Degree of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].count()
    }

    /// Neighbor set of `v` as a bit row over the full vertex universe.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &BitSet {
        &self.adj[v]
    }

    /// Writes the graph as a text adjacency matrix.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from the underlying writer.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for row in &self.adj {
            for j in 0..self.order() {
                let cell = if row.contains(j) { '1' } else { '0' };
                write!(out, "{cell}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Saves the graph to `path` as a text adjacency matrix.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating or writing the file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)?;
        out.flush()
    }

    /// Loads a graph from a text adjacency-matrix file.
    ///
    /// # Errors
    ///
    /// Returns [`GraphParseError::Io`] if the file cannot be read, or the
    /// parse error for malformed contents.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, GraphParseError> {
        let text = std::fs::read_to_string(path).map_err(|e| GraphParseError::Io(e.to_string()))?;
        parse_adjacency_matrix(&text)
    }
}

/// Parses a text adjacency matrix into a [`Graph`].
///
/// Input rules: one row per non-empty line, entries are the characters
/// `0` and `1` with no separators, the matrix must be square and symmetric
/// with a zero diagonal. Surrounding whitespace on each line is ignored.
///
/// # Errors
///
/// Returns the first violated input rule; see [`GraphParseError`].
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, GraphParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(GraphParseError::Empty);
    }
    let n = lines.len();

    let mut rows = Vec::with_capacity(n);
    for (i, line) in lines.iter().enumerate() {
        let bytes = line.as_bytes();
        if bytes.len() != n {
            return Err(GraphParseError::NonSquare {
                row: i,
                expected: n,
                got: bytes.len(),
            });
        }
        let mut row = BitSet::new_empty(n);
        for (j, &b) in bytes.iter().enumerate() {
            match b {
                b'0' => {}
                b'1' => row.set_bit(j),
                _ => {
                    return Err(GraphParseError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    })
                }
            }
        }
        rows.push(row);
    }

    for (i, row) in rows.iter().enumerate() {
        if row.contains(i) {
            return Err(GraphParseError::SelfLoop { vertex: i });
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if rows[i].contains(j) != rows[j].contains(i) {
                return Err(GraphParseError::NotSymmetric { i, j });
            }
        }
    }

    let num_edges = rows.iter().map(BitSet::count).sum::<usize>() / 2;
    Ok(Graph {
        adj: rows,
        num_edges,
    })
}

/// Error cases for adjacency-matrix parsing and file I/O.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphParseError {
    /// The input contained no rows at all.
    Empty,
    /// A row length did not match the number of rows.
    NonSquare {
        /// Zero-based row index.
        row: usize,
        /// Expected row length (the matrix order).
        expected: usize,
        /// Actual row length.
        got: usize,
    },
    /// A matrix entry was neither `0` nor `1`.
    InvalidChar {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The offending character.
        ch: char,
    },
    /// The diagonal carried a `1`.
    SelfLoop {
        /// The vertex with a self-loop.
        vertex: usize,
    },
    /// `a[i][j]` and `a[j][i]` disagreed.
    NotSymmetric {
        /// First vertex of the mismatched pair.
        i: usize,
        /// Second vertex of the mismatched pair.
        j: usize,
    },
    /// An underlying I/O error, stringified.
    Io(String),
}

impl fmt::Display for GraphParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphParseError::Empty => write!(f, "adjacency matrix is empty"),
            GraphParseError::NonSquare { row, expected, got } => write!(
                f,
                "row {row}: expected {expected} entries, got {got} (matrix must be square)"
            ),
            GraphParseError::InvalidChar { row, col, ch } => {
                write!(f, "invalid character {ch:?} at row {row}, column {col}")
            }
            GraphParseError::SelfLoop { vertex } => {
                write!(f, "self-loop at vertex {vertex} (diagonal must be zero)")
            }
            GraphParseError::NotSymmetric { i, j } => {
                write!(f, "matrix is not symmetric at ({i}, {j})")
            }
            GraphParseError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for GraphParseError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn sample_graph() -> Graph {
        // Path 0-1-2-3 plus the chord 1-3 and the isolated vertex 4.
        Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (1, 3)])
    }

    #[test]
    fn edges_are_symmetric() {
        let g = sample_graph();
        assert_eq!(g.order(), 5);
        assert_eq!(g.num_edges(), 4);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 0));
        assert!(!g.has_edge(0, 2));
        assert!(!g.has_edge(4, 0));
    }

    #[test]
    fn degrees_and_neighbor_rows_agree() {
        let g = sample_graph();
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(1), 3);
        assert_eq!(g.degree(4), 0);
        let n1: Vec<usize> = g.neighbors(1).iter().collect();
        assert_eq!(n1, vec![0, 2, 3]);
    }

    #[test]
    fn duplicate_edges_are_counted_once() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1);
        g.add_edge(1, 0);
        g.add_edge(0, 1);
        assert_eq!(g.num_edges(), 1);
    }

    // Panic tests run in debug only; the release profile aborts on panic.
    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "self-loop")]
    fn self_loops_are_rejected() {
        let mut g = Graph::new(3);
        g.add_edge(1, 1);
    }

    #[test]
    fn handshaking_lemma_holds() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let g = Graph::new_random(&mut rng, 100, 0.3);
        let degree_sum: usize = (0..g.order()).map(|v| g.degree(v)).sum();
        assert_eq!(degree_sum, 2 * g.num_edges());
    }

    #[test]
    fn random_graphs_are_symmetric_across_words() {
        let mut rng = XorShiftRng::seed_from_u64(99);
        let g = Graph::new_random(&mut rng, 150, 0.2);
        for i in 0..g.order() {
            assert!(!g.has_edge(i, i));
            for j in 0..g.order() {
                assert_eq!(g.has_edge(i, j), g.has_edge(j, i));
            }
        }
    }

    #[test]
    fn parse_round_trips_through_write() {
        let g = sample_graph();
        let mut buf = Vec::new();
        g.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let parsed = parse_adjacency_matrix(&text).unwrap();
        assert_eq!(parsed, g);
    }

    #[test]
    fn parse_accepts_a_triangle() {
        let g = parse_adjacency_matrix("011\n101\n110\n").unwrap();
        assert_eq!(g.order(), 3);
        assert_eq!(g.num_edges(), 3);
        assert!(g.has_edge(0, 2));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(parse_adjacency_matrix("  \n \n"), Err(GraphParseError::Empty));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = parse_adjacency_matrix("01\n1").unwrap_err();
        assert_eq!(
            err,
            GraphParseError::NonSquare {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn parse_rejects_foreign_characters() {
        let err = parse_adjacency_matrix("01\nx0").unwrap_err();
        assert_eq!(
            err,
            GraphParseError::InvalidChar {
                row: 1,
                col: 0,
                ch: 'x'
            }
        );
    }

    #[test]
    fn parse_rejects_nonzero_diagonal() {
        let err = parse_adjacency_matrix("10\n00").unwrap_err();
        assert_eq!(err, GraphParseError::SelfLoop { vertex: 0 });
    }

    #[test]
    fn parse_rejects_asymmetry() {
        let err = parse_adjacency_matrix("010\n000\n000").unwrap_err();
        assert_eq!(err, GraphParseError::NotSymmetric { i: 0, j: 1 });
    }

    #[test]
    fn file_round_trip_preserves_the_graph() {
        let mut rng = XorShiftRng::seed_from_u64(11);
        let g = Graph::new_random(&mut rng, 80, 0.25);
        let path = std::env::temp_dir().join("seqcolor_graph_roundtrip.txt");
        g.save_to_file(&path).unwrap();
        let loaded = Graph::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, g);
    }
}
