//! Slice algorithms. Every function takes an explicit ordering in its `_by`
//! form; the short form uses the element type's own `Ord`.

pub mod bound;
pub mod nth_element;
pub mod search;
pub mod sort;

pub use bound::{lower_bound, lower_bound_by, upper_bound, upper_bound_by};
pub use nth_element::{nth_element, nth_element_by};
pub use search::{search, search_by};
pub use sort::{sort, sort_by};
