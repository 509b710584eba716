pub mod comparator;
pub mod container;
pub mod iterator;

pub use comparator::Comparator;
pub use container::Container;
pub use iterator::Snapshot;
