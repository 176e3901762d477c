//! Rank type and the arithmetic rules applied to half-tree ranks.
//!
//! # Why u8?
//!
//! A rank only grows when two trees of equal rank are linked, so the largest
//! rank in a queue of `n` elements is logarithmic in `n`. `u8` covers any queue
//! that fits in memory and keeps forest nodes small.
//!
//! # Rules
//!
//! - Roots: `rank = rank(left) + 1`, or `0` without a left child
//!   ([`root_rank`]).
//! - Non-roots after a cut below them: the type-2 rule in
//!   [`restored_rank`], which lets a node keep a rank one larger than its
//!   children when they are close, and otherwise adopt the larger child rank.

/// Type alias for node rank.
pub type Rank = u8;

/// Maximum valid rank value.
pub const MAX_RANK: Rank = u8::MAX;

/// Safely increment a rank value, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`. This would require a queue with more than
/// 2²⁵⁵ elements, so reaching it means the forest is corrupted.
///
/// # Example
///
/// ```rust
/// use rank_pairing_queue::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: ranks are logarithmic in the queue size \
         and u8::MAX (255) covers queues with up to 2²⁵⁵ elements",
    )
}

/// Rank of a root whose leftmost child has rank `left`.
///
/// ```rust
/// use rank_pairing_queue::rank::root_rank;
///
/// assert_eq!(root_rank(None), 0);
/// assert_eq!(root_rank(Some(3)), 4);
/// ```
#[inline]
pub fn root_rank(left: Option<Rank>) -> Rank {
    left.map_or(0, checked_increment)
}

/// Rank of a non-root node given the ranks of its left child and its sibling.
///
/// A missing child counts as rank `-1`. With `i` and `j` the two ranks, the
/// result is `max(i, j)` when they differ by more than one and
/// `max(i, j) + 1` otherwise. A leaf with no sibling therefore gets rank 0.
///
/// ```rust
/// use rank_pairing_queue::rank::restored_rank;
///
/// assert_eq!(restored_rank(None, None), 0);
/// assert_eq!(restored_rank(Some(2), Some(2)), 3);
/// assert_eq!(restored_rank(Some(4), Some(1)), 4);
/// assert_eq!(restored_rank(None, Some(0)), 1);
/// ```
#[inline]
pub fn restored_rank(left: Option<Rank>, sibling: Option<Rank>) -> Rank {
    let i = left.map_or(-1, i16::from);
    let j = sibling.map_or(-1, i16::from);
    let high = i.max(j);
    let rank = if (i - j).abs() > 1 { high } else { high + 1 };
    // `high >= -1`, and `high == -1` only when both are absent (diff 0).
    Rank::try_from(rank).unwrap_or(MAX_RANK)
}

/// Initial number of consolidation buckets for a queue holding `len` nodes.
///
/// Returns `floor(log2(len)) + 2`, which is at least `ceil(log2(len)) + 1`.
///
/// ```rust
/// use rank_pairing_queue::rank::bucket_count;
///
/// assert_eq!(bucket_count(1), 2);
/// assert_eq!(bucket_count(8), 5);
/// ```
#[inline]
pub fn bucket_count(len: usize) -> usize {
    let bits = (usize::BITS - len.leading_zeros()) as usize;
    bits.max(1) + 1
}
