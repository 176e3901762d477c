//! Keyed priority queue on a rank-pairing heap
//!
//! This crate provides [`RankPairingQueue`], a min-priority queue whose
//! elements are addressed by unique keys and whose values can be lowered in
//! place. It is meant as a building block for algorithms that lean on
//! decrease-key, such as Dijkstra's shortest paths or event scheduling.
//!
//! # Complexity
//!
//! | Operation  | Cost             |
//! |------------|------------------|
//! | `push`     | O(1) amortized   |
//! | `peek`     | O(1)             |
//! | `decrease` | O(1) amortized   |
//! | `pop`      | O(log n) amortized |
//!
//! # Example
//!
//! ```rust
//! use rank_pairing_queue::RankPairingQueue;
//!
//! let mut queue = RankPairingQueue::new();
//! queue.push(10u32, 7i64);
//! queue.push(11, 3);
//! queue.decrease(&10, 1);
//! assert_eq!(queue.peek(), Some((&10, &1)));
//! assert_eq!(queue.pop(), Some((10, 1)));
//! assert_eq!(queue.pop(), Some((11, 3)));
//! assert_eq!(queue.pop(), None);
//! ```

mod forest;
pub mod pathfinding;
pub mod queue;
pub mod rank;
pub mod traits;

pub use forest::QueueStats;
pub use queue::RankPairingQueue;
pub use traits::{KeyedPriorityQueue, QueueError};
