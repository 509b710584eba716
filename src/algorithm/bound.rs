use std::cmp::Ordering;

/// Index of the first element of the sorted slice `v` that does not compare
/// less than `target`, or `v.len()` if there is none.
pub fn lower_bound_by<T, F>(v: &[T], target: &T, f: F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let (mut lo, mut hi) = (0, v.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if f(&v[mid], target) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Index of the first element of the sorted slice `v` that compares greater
/// than `target`, or `v.len()` if there is none.
pub fn upper_bound_by<T, F>(v: &[T], target: &T, f: F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let (mut lo, mut hi) = (0, v.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if f(&v[mid], target) == Ordering::Greater {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

pub fn lower_bound<T: Ord>(v: &[T], target: &T) -> usize {
    lower_bound_by(v, target, T::cmp)
}

pub fn upper_bound<T: Ord>(v: &[T], target: &T) -> usize {
    upper_bound_by(v, target, T::cmp)
}
