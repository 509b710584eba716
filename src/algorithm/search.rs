use super::bound::lower_bound_by;
use std::cmp::Ordering;

/// Binary search over the sorted slice `v`. Returns the index of the first
/// element equal to `target`.
pub fn search_by<T, F>(v: &[T], target: &T, f: F) -> Option<usize>
where
    F: Fn(&T, &T) -> Ordering,
{
    let index = lower_bound_by(v, target, &f);
    match v.get(index) {
        Some(found) if f(found, target) == Ordering::Equal => Some(index),
        _ => None,
    }
}

pub fn search<T: Ord>(v: &[T], target: &T) -> Option<usize> {
    search_by(v, target, T::cmp)
}
