//! Common trait and error type for keyed priority queues
//!
//! [`KeyedPriorityQueue`] is the interface algorithms such as
//! [`dijkstra`](crate::pathfinding::dijkstra) are written against. Elements are
//! addressed by a caller-chosen key instead of an opaque handle, so the same key
//! that was pushed can later be used to lower its value.
//!
//! Operations that cannot apply (a duplicate push, a decrease of an absent key
//! or to a value that is not smaller) leave the queue untouched. The plain
//! methods report this as `false`; the `try_*` methods say why through
//! [`QueueError`].

use std::fmt;

/// Reason an operation left the queue unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The key is already present; its stored value was kept
    DuplicateKey,
    /// The key is not present in the queue
    KeyNotFound,
    /// The new value is not less than the stored value
    ValueNotDecreased,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::DuplicateKey => write!(f, "key is already present in the queue"),
            QueueError::KeyNotFound => write!(f, "key is not present in the queue"),
            QueueError::ValueNotDecreased => {
                write!(f, "new value is not less than the current value")
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// A min-priority queue whose elements are identified by unique keys
///
/// # Example
///
/// ```rust
/// use rank_pairing_queue::{KeyedPriorityQueue, RankPairingQueue};
///
/// let mut queue: RankPairingQueue<u32, i64> = KeyedPriorityQueue::new();
/// queue.push(1, 40);
/// queue.push(2, 30);
/// queue.decrease(&1, 10);
/// assert_eq!(queue.peek(), Some((&1, &10)));
/// ```
pub trait KeyedPriorityQueue<K, V: Ord> {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns true if the queue holds no keys
    fn is_empty(&self) -> bool;

    /// Returns the number of live keys
    fn len(&self) -> usize;

    /// Returns true if `key` is currently in the queue
    fn contains_key(&self, key: &K) -> bool;

    /// Returns the value stored for `key`
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns the key and value with the minimum value, or `None` when empty
    ///
    /// Ties between equal values are broken arbitrarily.
    fn peek(&self) -> Option<(&K, &V)>;

    /// Inserts `key` with `value`
    ///
    /// # Errors
    /// Returns [`QueueError::DuplicateKey`] if `key` is already present. The
    /// stored value is kept.
    fn try_push(&mut self, key: K, value: V) -> Result<(), QueueError>;

    /// Removes and returns the minimum key and value, or `None` when empty
    fn pop(&mut self) -> Option<(K, V)>;

    /// Lowers the value stored for `key` to `value`
    ///
    /// # Errors
    /// - [`QueueError::KeyNotFound`] if `key` is absent
    /// - [`QueueError::ValueNotDecreased`] if `value` is not strictly less than
    ///   the stored value
    fn try_decrease(&mut self, key: &K, value: V) -> Result<(), QueueError>;

    /// Removes every key
    fn clear(&mut self);

    /// Inserts `key` with `value`, returning `false` if `key` was already present
    fn push(&mut self, key: K, value: V) -> bool {
        self.try_push(key, value).is_ok()
    }

    /// Lowers the value for `key`, returning `false` if nothing changed
    fn decrease(&mut self, key: &K, value: V) -> bool {
        self.try_decrease(key, value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            QueueError::DuplicateKey.to_string(),
            "key is already present in the queue"
        );
        assert_eq!(
            QueueError::KeyNotFound.to_string(),
            "key is not present in the queue"
        );
        assert_eq!(
            QueueError::ValueNotDecreased.to_string(),
            "new value is not less than the current value"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(QueueError::KeyNotFound);
        assert!(err.source().is_none());
    }
}
