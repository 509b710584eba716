/// Size queries shared by every container in the crate.
pub trait Container {
    /// Number of logical elements, duplicates included.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Size of a container that may not exist.
///
/// Returns `-1` for an absent container so callers can tell it apart from a
/// present but empty one, which reports `0`.
pub fn size_of<C>(container: Option<&C>) -> isize
where
    C: Container + ?Sized,
{
    match container {
        Some(c) => c.size() as isize,
        None => -1,
    }
}

/// Emptiness of a container that may not exist; an absent container is empty.
pub fn is_empty<C>(container: Option<&C>) -> bool
where
    C: Container + ?Sized,
{
    container.map_or(true, |c| c.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::linear::Stack;

    #[test]
    fn absent_container_sentinel() {
        let mut stack = Stack::new();
        assert_eq!(size_of(Some(&stack)), 0);
        assert_eq!(size_of::<Stack<u8>>(None), -1);
        assert!(is_empty::<Stack<u8>>(None));
        stack.push(1u8);
        assert_eq!(size_of(Some(&stack)), 1);
        assert!(!is_empty(Some(&stack)));
    }
}
