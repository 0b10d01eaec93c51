//! Exact longest-matching-block sequence alignment
//!
//! Every element of `b` is indexed and eligible for matching; nothing is
//! dropped as junk or as a too-frequent element. The recursion finds the
//! longest contiguous match, then aligns what lies to its left and right.

use std::collections::HashMap;
use std::hash::Hash;

use super::types::{OpTag, Opcode};

/// A run of equal elements: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchingBlock {
    /// Start of the run in `a`.
    pub a: usize,
    /// Start of the run in `b`.
    pub b: usize,
    /// Length of the run.
    pub size: usize,
}

impl MatchingBlock {
    const fn new(a: usize, b: usize, size: usize) -> Self {
        Self { a, b, size }
    }
}

/// Aligns two sequences of comparable elements.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    /// Ascending positions of every value of `b`.
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    #[must_use]
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    /// An empty result is reported as `(alo, blo, 0)`. Upper bounds past the
    /// end of a sequence are clamped to its length.
    #[must_use]
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let (a, b) = (self.a, self.b);
        let (ahi, bhi) = (ahi.min(a.len()), bhi.min(b.len()));
        let mut best = MatchingBlock::new(alo, blo, 0);

        // j2len[j] = length of the longest match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, elt) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(elt) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > best.size {
                        best = MatchingBlock::new(i + 1 - k, j + 1 - k, k);
                    }
                }
            }
            j2len = new_j2len;
        }

        // Grow the block while its neighbours are still equal
        while best.a > alo && best.b > blo && a[best.a - 1] == b[best.b - 1] {
            best = MatchingBlock::new(best.a - 1, best.b - 1, best.size + 1);
        }
        while best.a + best.size < ahi
            && best.b + best.size < bhi
            && a[best.a + best.size] == b[best.b + best.size]
        {
            best.size += 1;
        }

        best
    }

    /// All matching blocks in increasing order, adjacent blocks collapsed,
    /// terminated by the sentinel `(a.len(), b.len(), 0)`.
    #[must_use]
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut blocks = Vec::new();
        let mut queue = vec![(0, la, 0, lb)];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            blocks.push(block);
            if alo < block.a && blo < block.b {
                queue.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                queue.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
        }
        blocks.sort_unstable();

        let mut collapsed: Vec<MatchingBlock> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match collapsed.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => collapsed.push(block),
            }
        }
        collapsed.push(MatchingBlock::new(la, lb, 0));
        collapsed
    }

    /// Opcodes turning `a` into `b`.
    ///
    /// Ranges are contiguous and cover both sequences; two empty sequences
    /// produce no opcodes.
    #[must_use]
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut opcodes = Vec::new();
        let (mut i, mut j) = (0, 0);

        for block in self.matching_blocks() {
            let tag = match (i < block.a, j < block.b) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                opcodes.push(Opcode::new(tag, i, block.a, j, block.b));
            }

            i = block.a + block.size;
            j = block.b + block.size;
            if block.size > 0 {
                opcodes.push(Opcode::new(OpTag::Equal, block.a, i, block.b, j));
            }
        }

        opcodes
    }

    /// Similarity in `[0, 1]`: twice the matched elements over the total
    /// length; `1.0` when both sequences are empty.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matches as f64 / total as f64
    }
}

/// Opcodes turning `a` into `b`.
#[must_use]
pub fn align<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<Opcode> {
    SequenceMatcher::new(a, b).opcodes()
}
