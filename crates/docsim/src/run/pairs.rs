//! Pair derivation from a document snapshot.

use crate::document::Document;

/// One unordered pair of documents selected for comparison.
///
/// Holds positions into the run's frozen snapshot; `first` precedes
/// `second` in store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub first: usize,
    pub second: usize,
}

/// Enumerates every unordered pair in lexicographic index order:
/// `(0,1), (0,2), …, (0,n-1), (1,2), …`
///
/// This order is the output order of the result set. Fewer than two
/// documents yield no pairs. Pairs are derived, never stored: each run
/// recomputes them from the store's contents at start.
pub fn enumerate_pairs(documents: &[Document]) -> Vec<Pair> {
    let n = documents.len();
    let capacity = if n < 2 { 0 } else { n * (n - 1) / 2 };
    let mut pairs = Vec::with_capacity(capacity);

    for first in 0..n {
        for second in (first + 1)..n {
            pairs.push(Pair { first, second });
        }
    }

    pairs
}
