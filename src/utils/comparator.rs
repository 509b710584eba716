use crate::error::{Error, Result};
use log::warn;
use std::cmp::Ordering;
use std::sync::Arc;

/// A total order over `T` shared by a container and all of its snapshots.
///
/// The function must be antisymmetric for the whole lifetime of the container
/// that owns it: `cmp(a, b)` has to be the reverse of `cmp(b, a)`.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// The element type's own ordering.
pub fn natural<T: Ord + 'static>() -> Comparator<T> {
    Arc::new(|a: &T, b: &T| a.cmp(b))
}

/// The element type's ordering, reversed.
pub fn reversed<T: Ord + 'static>() -> Comparator<T> {
    Arc::new(|a: &T, b: &T| b.cmp(a))
}

pub fn from_fn<T, F>(f: F) -> Comparator<T>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Compares `a` against `b`, rejecting comparators whose answer does not
/// mirror the one obtained with the arguments swapped.
pub(crate) fn compare<T>(cmp: &Comparator<T>, a: &T, b: &T) -> Result<Ordering> {
    let forward = cmp(a, b);
    let backward = cmp(b, a);
    if forward != backward.reverse() {
        warn!(
            "comparator disagrees with itself: cmp(a, b) = {:?}, cmp(b, a) = {:?}",
            forward, backward
        );
        return Err(Error::InconsistentComparator);
    }
    Ok(forward)
}
