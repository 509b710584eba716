pub mod avltree;
pub mod rbtree;

pub use avltree::AvlTree;
pub use rbtree::RbTree;

// Full structural check after every mutation. It walks the whole tree, so it
// is opt-in through the `check-invariants` feature.
pub(crate) const CHECK_INVARIANTS: bool = cfg!(feature = "check-invariants");

/// What an insertion did to an ordered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inserted {
    /// A node was created for a key not seen before.
    New,
    /// The key was present and duplicates are allowed: its multiplicity grew.
    Duplicate,
    /// The key was present and duplicates are not allowed: the stored value
    /// was overwritten. The size does not change.
    Replaced,
}

impl Inserted {
    /// Whether the tree holds one more logical element than before.
    pub fn grew(self) -> bool {
        matches!(self, Inserted::New | Inserted::Duplicate)
    }
}

/// What a successful erase did to an ordered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Removed {
    /// One of several duplicates was dropped; the node stays.
    Decremented,
    /// The node holding the value was unlinked.
    Removed,
}
