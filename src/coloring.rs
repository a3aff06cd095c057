//! Greedy sequential coloring engines.
//!
//! Two engines share the same per-vertex assignment state but build their
//! color classes differently:
//!
//! * [`ColorClasses`] walks vertices in ascending order and places each
//!   into the first color class containing no neighbor, opening a new
//!   class when every existing one conflicts. One bit set per class makes
//!   the conflict test a word-wise intersection probe.
//! * [`IsetColoring`] repeatedly extracts a maximal independent set from
//!   the uncolored vertices and assigns it the next color wholesale. It
//!   needs only two working bit sets no matter how many colors it opens.
//!
//! Color `0` is the "uncolored" sentinel; real colors start at 1 and every
//! run uses the contiguous range `1..=number_of_colors()`.
//!
//! Engines keep their assignment across runs: a later run over a subset
//! recolors only that subset and leaves the stored colors of all other
//! vertices untouched, so callers can refine a coloring incrementally.
//! [`ColorClasses::reset`] and [`IsetColoring::reset`] return an engine to
//! its freshly constructed state.
//!
//! Both engines lean on the same word-level trick: vertices are processed
//! in ascending index order, so a vertex `v` only ever has to check or
//! prune storage words that its already-handled peers can reach. The
//! class probe inspects words `0..=word(v)` and the independent-set pass
//! erases neighbor words `word(v)..` only.

use crate::bitset::BitSet;
use crate::graph::Graph;

// ============================================================================
// Shared assignment state
// ============================================================================

/// Per-vertex color store shared by both engines.
#[derive(Clone, Debug)]
struct Assignment {
    /// `colors[v]` is the color of `v`, `0` meaning uncolored.
    colors: Vec<usize>,
    /// Number of colors used by the most recent run.
    num_colors: usize,
}

impl Assignment {
    fn new(order: usize) -> Self {
        Self {
            colors: vec![0; order],
            num_colors: 0,
        }
    }

    fn reset(&mut self) {
        self.colors.fill(0);
        self.num_colors = 0;
    }
}

// ============================================================================
// Color-class engine
// ============================================================================

/// First-fit coloring over explicit per-color bit sets.
///
/// Probing cost grows with the number of open classes, so the engine is
/// constructed with a hard budget `max_colors`. Budget `graph.order()` is
/// always sufficient for first-fit.
#[derive(Debug)]
pub struct ColorClasses<'g> {
    graph: &'g Graph,
    assign: Assignment,
    /// Index 0 unused; class `c` holds the vertices currently colored `c`.
    classes: Vec<BitSet>,
    max_colors: usize,
}

impl<'g> ColorClasses<'g> {
    /// Creates an engine bound to `graph` with a hard color budget.
    ///
    /// # Panics
    ///
    /// Panics if the graph is empty, `max_colors` is zero, or `max_colors`
    /// exceeds the graph order.
    pub fn new(graph: &'g Graph, max_colors: usize) -> Self {
        let n = graph.order();
        assert!(n > 0, "graph must not be empty");
        assert!(max_colors > 0, "color budget must be positive");
        assert!(
            max_colors <= n,
            "color budget {max_colors} exceeds the graph order {n}"
        );
        Self {
            graph,
            assign: Assignment::new(n),
            classes: vec![BitSet::new_empty(n); max_colors + 1],
            max_colors,
        }
    }

    /// Colors every vertex in ascending index order and returns the number
    /// of colors used.
    ///
    /// # Panics
    ///
    /// Panics if the run needs more than `max_colors` colors.
    pub fn color_graph(&mut self) -> usize {
        let n = self.graph.order();
        self.assign_in_order(0..n)
    }

    /// Colors exactly the vertices of `sequence`, in the given order, and
    /// returns the number of colors used for this run.
    ///
    /// Any order is accepted. The word-restricted conflict probe is exact
    /// when the sequence is ascending, or when the graph fits one storage
    /// word (64 vertices or fewer); other orders on larger graphs can miss
    /// a conflict above the current vertex's word, and the caller owns the
    /// properness of the result. Vertices outside the sequence keep
    /// whatever color they had. An empty sequence colors nothing and
    /// returns 1, since class 1 is opened unconditionally.
    ///
    /// # Panics
    ///
    /// Panics if the run needs more than `max_colors` colors. Out-of-range
    /// indices panic at the bit-set layer.
    pub fn color_sequence(&mut self, sequence: &[usize]) -> usize {
        self.assign_in_order(sequence.iter().copied())
    }

    fn assign_in_order<I: Iterator<Item = usize>>(&mut self, order: I) -> usize {
        let graph = self.graph;
        self.assign.num_colors = 1;
        self.classes[1].clear_all();
        for v in order {
            let last_word = BitSet::word_index(v);
            let neighbors = graph.neighbors(v);

            // First class whose members include no neighbor of v. Under an
            // ascending order every vertex colored so far is <= v, so words
            // above word(v) cannot hold a conflict and the probe stops there.
            let mut chosen = 0;
            for c in 1..=self.assign.num_colors {
                if neighbors
                    .first_common_through(last_word, &self.classes[c])
                    .is_none()
                {
                    chosen = c;
                    break;
                }
            }

            if chosen == 0 {
                assert!(
                    self.assign.num_colors < self.max_colors,
                    "color budget {} exhausted at vertex {v}",
                    self.max_colors
                );
                self.assign.num_colors += 1;
                chosen = self.assign.num_colors;
                // Stale members from an earlier run must not leak in.
                self.classes[chosen].clear_all();
            }

            self.assign.colors[v] = chosen;
            self.classes[chosen].set_bit(v);
        }
        self.assign.num_colors
    }

    /// Number of colors used by the most recent run, 0 before any run.
    #[inline(always)]
    pub fn number_of_colors(&self) -> usize {
        self.assign.num_colors
    }

    /// Color of `v`, 0 if uncolored.
    #[inline(always)]
    pub fn color(&self, v: usize) -> usize {
        self.assign.colors[v]
    }

    /// Full per-vertex color slice, indexed by vertex.
    #[inline(always)]
    pub fn colors(&self) -> &[usize] {
        &self.assign.colors
    }

    /// The graph this engine is bound to.
    #[inline(always)]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Drops all stored colors and class members, returning the engine to
    /// its freshly constructed state.
    pub fn reset(&mut self) {
        self.assign.reset();
        for class in &mut self.classes {
            class.clear_all();
        }
    }
}

// ============================================================================
// Independent-set engine
// ============================================================================

/// Coloring by repeated maximal-independent-set extraction.
///
/// Each pass copies the uncolored vertices into a candidate set, scans it
/// in ascending order, and greedily keeps every vertex not adjacent to one
/// already kept this pass; the kept vertices all receive the pass's color.
/// Memory is two bit sets regardless of how many colors are opened.
#[derive(Debug)]
pub struct IsetColoring<'g> {
    graph: &'g Graph,
    assign: Assignment,
    /// Candidates that can still join the independent set under construction.
    selected: BitSet,
    /// Vertices not yet colored in the current run.
    unselected: BitSet,
}

impl<'g> IsetColoring<'g> {
    /// Creates an engine bound to `graph`.
    ///
    /// # Panics
    ///
    /// Panics if the graph is empty.
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.order();
        assert!(n > 0, "graph must not be empty");
        Self {
            graph,
            assign: Assignment::new(n),
            selected: BitSet::new_empty(n),
            unselected: BitSet::new_empty(n),
        }
    }

    /// Colors every vertex and returns the number of colors used.
    pub fn color_graph(&mut self) -> usize {
        let n = self.graph.order();
        self.unselected.set_range(0, n - 1);
        self.run_passes(n)
    }

    /// Colors exactly the vertices selected by `subset` and returns the
    /// number of colors used for this run.
    ///
    /// The mask must share the graph's vertex universe. Vertices outside
    /// the mask keep whatever color they had.
    ///
    /// # Panics
    ///
    /// Panics if the mask selects no vertices.
    pub fn color_subset(&mut self, subset: &BitSet) -> usize {
        let remaining = subset.count();
        assert!(remaining > 0, "subset mask selects no vertices");
        self.unselected.copy_from(subset);
        self.run_passes(remaining)
    }

    /// One pass per color until every requested vertex is colored. The
    /// early exit inside the scan is the only regular way out.
    fn run_passes(&mut self, mut remaining: usize) -> usize {
        let graph = self.graph;
        self.assign.num_colors = 1;
        loop {
            self.selected.copy_from(&self.unselected);
            assert!(
                self.selected.any(),
                "no candidates left although {remaining} vertices remain uncolored"
            );

            let mut cursor = 0;
            while let Some(v) = self.selected.next_set_bit(cursor) {
                self.assign.colors[v] = self.assign.num_colors;

                remaining -= 1;
                if remaining == 0 {
                    return self.assign.num_colors;
                }

                // Drop v's neighbors from the candidate set. Words below
                // word(v) only hold candidates the cursor already passed,
                // so the erasure can start at word(v).
                self.selected
                    .subtract_from(BitSet::word_index(v), graph.neighbors(v));
                self.unselected.clear_bit(v);
                cursor = v + 1;
            }

            self.assign.num_colors += 1;
        }
    }

    /// Number of colors used by the most recent run, 0 before any run.
    #[inline(always)]
    pub fn number_of_colors(&self) -> usize {
        self.assign.num_colors
    }

    /// Color of `v`, 0 if uncolored.
    #[inline(always)]
    pub fn color(&self, v: usize) -> usize {
        self.assign.colors[v]
    }

    /// Full per-vertex color slice, indexed by vertex.
    #[inline(always)]
    pub fn colors(&self) -> &[usize] {
        &self.assign.colors
    }

    /// The graph this engine is bound to.
    #[inline(always)]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Drops all stored colors and working-set contents, returning the
    /// engine to its freshly constructed state.
    pub fn reset(&mut self) {
        self.assign.reset();
        self.selected.clear_all();
        self.unselected.clear_all();
    }
}

// ============================================================================
// Tests
// ============================================================================
