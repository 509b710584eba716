use log::debug;
use std::cmp::Ordering;
use std::mem;

/// Slices at least this long are merge sorted; shorter ones are quicksorted.
pub const MERGE_SORT_THRESHOLD: usize = 1 << 16;

/// Sorts `v` by `f`.
///
/// Short slices are sorted in place with quicksort. Long slices go through a
/// stable top-down merge sort, which clones elements into a scratch buffer.
pub fn sort_by<T, F>(v: &mut [T], f: F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if v.len() < MERGE_SORT_THRESHOLD {
        quick_sort(v, &f);
    } else {
        debug!("merge sorting {} elements", v.len());
        merge_sort(v, &f);
    }
}

pub fn sort<T: Ord + Clone>(v: &mut [T]) {
    sort_by(v, T::cmp)
}

/// Hoare partition around the middle element. Returns `j` such that every
/// element of `v[..=j]` compares no greater than every element of `v[j + 1..]`.
/// Requires `v.len() >= 2`, and then `j < v.len() - 1`.
pub(crate) fn partition<T, F>(v: &mut [T], f: &F) -> usize
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let pivot = v[(v.len() - 1) / 2].clone();
    let (mut i, mut j) = (0, v.len() - 1);
    loop {
        while f(&v[i], &pivot) == Ordering::Less {
            i += 1;
        }
        while f(&v[j], &pivot) == Ordering::Greater {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        v.swap(i, j);
        i += 1;
        j -= 1;
    }
}

fn quick_sort<T, F>(mut v: &mut [T], f: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    // recurse into the shorter half, loop on the longer one
    while v.len() > 1 {
        let split = partition(v, f);
        let (left, right) = mem::take(&mut v).split_at_mut(split + 1);
        if left.len() < right.len() {
            quick_sort(left, f);
            v = right;
        } else {
            quick_sort(right, f);
            v = left;
        }
    }
}

fn merge_sort<T, F>(v: &mut [T], f: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if v.len() <= 1 {
        return;
    }
    let mid = v.len() / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        merge_sort(left, f);
        merge_sort(right, f);
    }
    let mut merged = Vec::with_capacity(v.len());
    let (left, right) = v.split_at(mid);
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // take from the right only when strictly smaller, which keeps it stable
        if f(&right[j], &left[i]) == Ordering::Less {
            merged.push(right[j].clone());
            j += 1;
        } else {
            merged.push(left[i].clone());
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    v.clone_from_slice(&merged);
}
