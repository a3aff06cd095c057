//! Packed-word bit sets over a fixed vertex universe.
//!
//! Every set is sized once at construction and never grows. Vertices are
//! `usize` indices in `0..domain_size()`, stored 64 to a word with vertex
//! `i` living at bit `i % 64` of word `i / 64`. All operations keep the
//! excess bits of the last word clear, so word-wise comparisons and
//! population counts never see garbage.
//!
//! Three scanning modes are provided, matching how the coloring engines
//! consume sets:
//!
//! * [`BitSet::iter`] walks a snapshot-free borrow of the words and is the
//!   right tool when the set is not mutated while scanning.
//! * [`BitSet::next_set_bit`] is a cursor that re-reads the words on every
//!   call, so bits erased behind or ahead of the cursor are observed. The
//!   independent-set engine relies on this while it prunes neighbors out
//!   of the set it is scanning.
//! * [`BitSet::pop_first`] destructively drains the lowest set bit.

/// Bits per storage word.
const WORD_BITS: usize = 64;

#[inline]
fn num_words(nbits: usize) -> usize {
    nbits.div_ceil(WORD_BITS)
}

/// Fixed-universe bit set backed by a `Vec<u64>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
    nbits: usize,
}

impl BitSet {
    /// Creates an empty set over a universe of `nbits` positions.
    pub fn new_empty(nbits: usize) -> Self {
        Self {
            words: vec![0; num_words(nbits)],
            nbits,
        }
    }

    /// Creates a set over `nbits` positions with every position a member.
    pub fn new_filled(nbits: usize) -> Self {
        let mut set = Self {
            words: vec![!0; num_words(nbits)],
            nbits,
        };
        set.clear_excess_bits();
        set
    }

    /// Creates a set over `nbits` positions containing exactly `members`.
    pub fn from_members(nbits: usize, members: &[usize]) -> Self {
        let mut set = Self::new_empty(nbits);
        for &m in members {
            set.set_bit(m);
        }
        set
    }

    /// Zeroes the bits of the last word that lie beyond `nbits`.
    fn clear_excess_bits(&mut self) {
        let used = self.nbits % WORD_BITS;
        if used != 0 {
            let last = self.words.len() - 1;
            self.words[last] &= (1u64 << used) - 1;
        }
    }

    /// Word holding bit `pos`.
    #[inline(always)]
    pub const fn word_index(pos: usize) -> usize {
        pos / WORD_BITS
    }

    /// Number of positions in the universe.
    #[inline(always)]
    pub fn domain_size(&self) -> usize {
        self.nbits
    }

    /// Inserts `pos` into the set.
    #[inline(always)]
    pub fn set_bit(&mut self, pos: usize) {
        debug_assert!(pos < self.nbits, "bit {pos} outside universe {}", self.nbits);
        self.words[pos / WORD_BITS] |= 1u64 << (pos % WORD_BITS);
    }

    /// Inserts every position in the inclusive range `lo..=hi`.
    #[inline]
    pub fn set_range(&mut self, lo: usize, hi: usize) {
        debug_assert!(lo <= hi, "empty range {lo}..={hi}");
        debug_assert!(hi < self.nbits, "bit {hi} outside universe {}", self.nbits);
        let (wl, wh) = (lo / WORD_BITS, hi / WORD_BITS);
        let ml = !0u64 << (lo % WORD_BITS);
        let mh = !0u64 >> (WORD_BITS - 1 - hi % WORD_BITS);
        if wl == wh {
            self.words[wl] |= ml & mh;
        } else {
            self.words[wl] |= ml;
            for w in &mut self.words[wl + 1..wh] {
                *w = !0;
            }
            self.words[wh] |= mh;
        }
    }

    /// Removes `pos` from the set.
    #[inline(always)]
    pub fn clear_bit(&mut self, pos: usize) {
        debug_assert!(pos < self.nbits, "bit {pos} outside universe {}", self.nbits);
        self.words[pos / WORD_BITS] &= !(1u64 << (pos % WORD_BITS));
    }

    /// Removes every member, leaving the universe size unchanged.
    #[inline]
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Returns whether `pos` is a member.
    #[inline(always)]
    pub fn contains(&self, pos: usize) -> bool {
        debug_assert!(pos < self.nbits, "bit {pos} outside universe {}", self.nbits);
        self.words[pos / WORD_BITS] & (1u64 << (pos % WORD_BITS)) != 0
    }

    /// Number of members.
    #[inline]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns whether the set has any member at all.
    #[inline]
    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    /// Overwrites this set with the contents of `other`.
    ///
    /// Both sets must share the same universe size.
    #[inline]
    pub fn copy_from(&mut self, other: &BitSet) {
        debug_assert_eq!(self.nbits, other.nbits, "universe size mismatch");
        self.words.copy_from_slice(&other.words);
    }

    /// Iterates the members in ascending order.
    ///
    /// The iterator caches the current word, so erasures performed while it
    /// is live are not observed. Use [`BitSet::next_set_bit`] when the set
    /// mutates mid-scan.
    pub fn iter(&self) -> BitIter<'_> {
        BitIter {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Returns the lowest member at or above `from`, re-reading the words.
    ///
    /// Unlike [`BitSet::iter`] this holds no cached state, so a caller may
    /// interleave erasures with the scan and the next call reflects them.
    #[inline]
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        if from >= self.nbits {
            return None;
        }
        let mut w = from / WORD_BITS;
        let mut current = self.words[w] & (!0u64 << (from % WORD_BITS));
        loop {
            if current != 0 {
                return Some(w * WORD_BITS + current.trailing_zeros() as usize);
            }
            w += 1;
            if w == self.words.len() {
                return None;
            }
            current = self.words[w];
        }
    }

    /// Removes and returns the lowest member, or `None` if the set is empty.
    #[inline]
    pub fn pop_first(&mut self) -> Option<usize> {
        for (i, word) in self.words.iter_mut().enumerate() {
            if *word != 0 {
                let bit = word.trailing_zeros() as usize;
                *word &= *word - 1;
                return Some(i * WORD_BITS + bit);
            }
        }
        None
    }

    /// Returns the lowest position set in both `self` and `other` within
    /// words `0..=last_word`, or `None` if the restricted intersection is
    /// empty.
    ///
    /// Members above `last_word` are deliberately invisible to this probe.
    /// Both sets must share the same universe size.
    #[inline]
    pub fn first_common_through(&self, last_word: usize, other: &BitSet) -> Option<usize> {
        debug_assert_eq!(self.nbits, other.nbits, "universe size mismatch");
        debug_assert!(last_word < self.words.len(), "word {last_word} outside universe");
        for w in 0..=last_word {
            let common = self.words[w] & other.words[w];
            if common != 0 {
                return Some(w * WORD_BITS + common.trailing_zeros() as usize);
            }
        }
        None
    }

    /// Removes the members of `other` from `self`, touching only words
    /// `first_word..` and leaving lower words untouched.
    ///
    /// Both sets must share the same universe size.
    #[inline]
    pub fn subtract_from(&mut self, first_word: usize, other: &BitSet) {
        debug_assert_eq!(self.nbits, other.nbits, "universe size mismatch");
        debug_assert!(first_word <= self.words.len(), "word {first_word} outside universe");
        for (w, o) in self.words[first_word..]
            .iter_mut()
            .zip(&other.words[first_word..])
        {
            *w &= !*o;
        }
    }
}

/// Ascending member iterator over a borrowed [`BitSet`].
#[derive(Clone, Debug)]
pub struct BitIter<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for BitIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_idx += 1;
            if self.word_idx >= self.words.len() {
                return None;
            }
            self.current = self.words[self.word_idx];
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(self.word_idx * WORD_BITS + bit)
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = BitIter<'a>;

    fn into_iter(self) -> BitIter<'a> {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    #[test]
    fn empty_set_has_no_members() {
        let set = BitSet::new_empty(130);
        assert_eq!(set.count(), 0);
        assert!(!set.any());
        assert_eq!(set.domain_size(), 130);
        assert_eq!(set.iter().next(), None);
        assert_eq!(set.next_set_bit(0), None);
    }

    #[test]
    fn filled_set_contains_everything() {
        let set = BitSet::new_filled(130);
        assert_eq!(set.count(), 130);
        assert!(set.contains(0));
        assert!(set.contains(63));
        assert!(set.contains(64));
        assert!(set.contains(129));
        // Excess bits of the last word stay clear.
        assert_eq!(set.iter().last(), Some(129));
    }

    #[test]
    fn set_and_clear_across_word_boundary() {
        let mut set = BitSet::new_empty(130);
        for &b in &[0, 5, 63, 64, 100, 129] {
            set.set_bit(b);
        }
        assert_eq!(set.count(), 6);
        assert!(set.contains(63));
        assert!(set.contains(64));
        assert!(!set.contains(65));

        set.clear_bit(64);
        assert!(!set.contains(64));
        assert_eq!(set.count(), 5);

        set.clear_all();
        assert!(!set.any());
        assert_eq!(set.domain_size(), 130);
    }

    #[test]
    fn from_members_matches_explicit_sets() {
        let members = [3, 64, 65, 127];
        let set = BitSet::from_members(200, &members);
        let collected: Vec<usize> = set.iter().collect();
        assert_eq!(collected, members);
    }

    #[test]
    fn set_range_single_word() {
        let mut set = BitSet::new_empty(64);
        set.set_range(3, 10);
        let collected: Vec<usize> = set.iter().collect();
        assert_eq!(collected, (3..=10).collect::<Vec<_>>());
    }

    #[test]
    fn set_range_spanning_words() {
        let mut set = BitSet::new_empty(200);
        set.set_range(60, 140);
        assert_eq!(set.count(), 81);
        assert!(!set.contains(59));
        assert!(set.contains(60));
        assert!(set.contains(63));
        assert!(set.contains(64));
        assert!(set.contains(140));
        assert!(!set.contains(141));
    }

    #[test]
    fn set_range_full_universe_equals_filled() {
        let mut set = BitSet::new_empty(130);
        set.set_range(0, 129);
        assert_eq!(set, BitSet::new_filled(130));
    }

    #[test]
    fn iter_visits_members_in_ascending_order() {
        let set = BitSet::from_members(256, &[1, 2, 63, 64, 128, 255]);
        let collected: Vec<usize> = set.iter().collect();
        assert_eq!(collected, vec![1, 2, 63, 64, 128, 255]);
    }

    #[test]
    fn cursor_scan_starts_mid_word() {
        let set = BitSet::from_members(130, &[5, 40, 70, 129]);
        assert_eq!(set.next_set_bit(0), Some(5));
        assert_eq!(set.next_set_bit(6), Some(40));
        assert_eq!(set.next_set_bit(41), Some(70));
        assert_eq!(set.next_set_bit(70), Some(70));
        assert_eq!(set.next_set_bit(71), Some(129));
        assert_eq!(set.next_set_bit(130), None);
    }

    #[test]
    fn cursor_scan_observes_interleaved_erasures() {
        let mut set = BitSet::from_members(130, &[2, 40, 70, 100]);
        let mask = BitSet::from_members(130, &[40, 100]);

        let first = set.next_set_bit(0).unwrap();
        assert_eq!(first, 2);
        set.subtract_from(BitSet::word_index(first), &mask);

        // 40 and 100 vanished mid-scan and the cursor must not yield them.
        assert_eq!(set.next_set_bit(first + 1), Some(70));
        assert_eq!(set.next_set_bit(71), None);
    }

    #[test]
    fn pop_first_drains_in_ascending_order() {
        let mut set = BitSet::from_members(130, &[7, 64, 129]);
        assert_eq!(set.pop_first(), Some(7));
        assert_eq!(set.pop_first(), Some(64));
        assert_eq!(set.pop_first(), Some(129));
        assert_eq!(set.pop_first(), None);
        assert!(!set.any());
    }

    #[test]
    fn first_common_through_sees_only_the_word_prefix() {
        let a = BitSet::from_members(200, &[5, 150]);
        let b = BitSet::from_members(200, &[5, 150]);
        // Probe limited to word 0: the shared bit 150 is out of reach.
        assert_eq!(a.first_common_through(0, &b), Some(5));

        let c = BitSet::from_members(200, &[150]);
        assert_eq!(a.first_common_through(0, &c), None);
        assert_eq!(a.first_common_through(BitSet::word_index(150), &c), Some(150));
    }

    #[test]
    fn first_common_through_reports_lowest_common_bit() {
        let a = BitSet::from_members(200, &[10, 65, 130]);
        let b = BitSet::from_members(200, &[65, 130]);
        assert_eq!(a.first_common_through(3, &b), Some(65));
    }

    #[test]
    fn subtract_from_leaves_lower_words_alone() {
        let mut set = BitSet::from_members(200, &[5, 70, 130]);
        let mask = BitSet::from_members(200, &[5, 70, 130]);
        set.subtract_from(1, &mask);
        // Word 0 is below the start word and must keep its bit.
        assert!(set.contains(5));
        assert!(!set.contains(70));
        assert!(!set.contains(130));
    }

    #[test]
    fn copy_from_duplicates_members() {
        let src = BitSet::from_members(130, &[1, 64, 129]);
        let mut dst = BitSet::new_filled(130);
        dst.copy_from(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn random_sets_agree_with_a_boolean_model() {
        let mut rng = XorShiftRng::seed_from_u64(0x5e9c0107);
        for _ in 0..20 {
            let nbits = rng.random_range(1..300);
            let mut model = vec![false; nbits];
            let mut set = BitSet::new_empty(nbits);
            for _ in 0..nbits {
                let pos = rng.random_range(0..nbits);
                if rng.random_bool(0.7) {
                    model[pos] = true;
                    set.set_bit(pos);
                } else {
                    model[pos] = false;
                    set.clear_bit(pos);
                }
            }
            let expected: Vec<usize> = (0..nbits).filter(|&i| model[i]).collect();
            let got: Vec<usize> = set.iter().collect();
            assert_eq!(got, expected);
            assert_eq!(set.count(), expected.len());
            for &e in &expected {
                assert!(set.contains(e));
            }
        }
    }

    #[test]
    fn random_subtract_matches_the_model() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        for _ in 0..20 {
            let nbits = rng.random_range(65..300);
            let mut a = BitSet::new_empty(nbits);
            let mut b = BitSet::new_empty(nbits);
            let mut ma = vec![false; nbits];
            let mut mb = vec![false; nbits];
            for i in 0..nbits {
                if rng.random_bool(0.4) {
                    a.set_bit(i);
                    ma[i] = true;
                }
                if rng.random_bool(0.4) {
                    b.set_bit(i);
                    mb[i] = true;
                }
            }
            let first_word = rng.random_range(0..nbits / 64 + 1);
            a.subtract_from(first_word, &b);
            for i in 0..nbits {
                let expected = if i / 64 >= first_word {
                    ma[i] && !mb[i]
                } else {
                    ma[i]
                };
                assert_eq!(a.contains(i), expected, "bit {i}");
            }
        }
    }
}
