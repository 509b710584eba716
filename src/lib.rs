//! Generic containers and slice algorithms.
//!
//! The centerpiece is [RbTree], an ordered dictionary that can keep duplicate
//! elements and is safe to share between threads. Around it sit an AVL tree,
//! linear containers, sorted sets, prefix trees and a handful of slice
//! algorithms. Every container hands out [Snapshot]s for iteration, copies
//! taken under the container's lock.

mod error;

pub mod algorithm;
pub mod linear;
pub mod prefix;
pub mod set;
pub mod tree;
pub mod utils;

pub use error::{Error, Result};
pub use linear::{Heap, Queue, Ring, Stack};
pub use prefix::{Radix, Trie};
pub use set::{MultiSet, Set};
pub use tree::{AvlTree, Inserted, RbTree, Removed};
pub use utils::{Comparator, Container, Snapshot};
