pub mod multiset;
#[allow(clippy::module_inception)]
pub mod set;

pub use multiset::MultiSet;
pub use set::Set;
