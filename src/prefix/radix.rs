use crate::utils::{Container, Snapshot};
use indexmap::IndexMap;
use log::debug;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::mem;

type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Non-empty `/`-separated segments of `path`.
fn segments(path: &str) -> Segments<'_> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

struct Node<V> {
    count: usize,
    value: Option<V>,
    // kept in the order segments were first inserted
    children: IndexMap<String, Node<V>>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Node {
            count: 0,
            value: None,
            children: IndexMap::new(),
        }
    }

    fn descend(&self, path: &[&str]) -> Option<&Node<V>> {
        path.iter()
            .try_fold(self, |node, segment| node.children.get(*segment))
    }

    fn erase(&mut self, path: &[&str]) -> usize {
        let removed = match self.descend(path) {
            Some(target) if target.count > 0 => target.count,
            _ => return 0,
        };
        let mut node = self;
        for segment in path {
            node.count -= removed;
            if node
                .children
                .get(*segment)
                .map_or(false, |child| child.count == removed)
            {
                node.children.shift_remove(*segment);
                return removed;
            }
            node = match node.children.get_mut(*segment) {
                Some(child) => child,
                None => return removed,
            };
        }
        *node = Node::new();
        removed
    }

    fn collect_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut prefix = String::new();
        // each level remembers where the prefix stood before its segment
        let mut levels = vec![(self.children.iter(), 0)];
        while let Some((level, _)) = levels.last_mut() {
            match level.next() {
                Some((segment, child)) => {
                    let mark = prefix.len();
                    prefix.push('/');
                    prefix.push_str(segment);
                    if child.value.is_some() {
                        out.push(prefix.clone());
                    }
                    levels.push((child.children.iter(), mark));
                }
                None => {
                    if let Some((_, mark)) = levels.pop() {
                        prefix.truncate(mark);
                    }
                }
            }
        }
        out
    }
}

impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut pending: Vec<Node<V>> = mem::take(&mut self.children)
            .into_iter()
            .map(|(_, child)| child)
            .collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(
                mem::take(&mut node.children)
                    .into_iter()
                    .map(|(_, child)| child),
            );
        }
    }
}

/// A tree over `/`-separated paths.
///
/// Paths are normalized by dropping empty segments, so `a//b/` and `/a/b`
/// name the same entry. Counting follows [Trie](super::Trie): each node counts
/// the insertions passing through it.
pub struct Radix<V> {
    root: Mutex<Node<V>>,
}

impl<V> Default for Radix<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Radix<V> {
    pub fn new() -> Self {
        Radix {
            root: Mutex::new(Node::new()),
        }
    }

    /// Stores `value` under `path`. Returns `false`, storing nothing, when
    /// `path` has no non-empty segment.
    pub fn insert(&self, path: &str, value: V) -> bool {
        let path = segments(path);
        if path.is_empty() {
            return false;
        }
        let mut root = self.root.lock();
        let mut node = &mut *root;
        node.count += 1;
        for segment in path {
            node = node
                .children
                .entry(segment.to_owned())
                .or_insert_with(Node::new);
            node.count += 1;
        }
        node.value = Some(value);
        true
    }

    /// Removes every path under `prefix` and returns how many insertions were
    /// dropped. A prefix without segments clears the tree.
    pub fn erase(&self, prefix: &str) -> usize {
        let removed = self.root.lock().erase(&segments(prefix));
        if removed > 0 {
            debug!("erased {} insertions under path {:?}", removed, prefix);
        }
        removed
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.root
            .lock()
            .descend(&segments(prefix))
            .map_or(0, |node| node.count)
    }

    pub fn find(&self, path: &str) -> Option<V>
    where
        V: Clone,
    {
        self.root
            .lock()
            .descend(&segments(path))
            .and_then(|node| node.value.clone())
    }

    pub fn size(&self) -> usize {
        self.root.lock().count
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn clear(&self) {
        *self.root.lock() = Node::new();
    }

    /// Stored paths as `/a/b/c`, depth first, siblings in insertion order.
    pub fn iter(&self) -> Snapshot<String> {
        Snapshot::new(self.root.lock().collect_paths())
    }
}

impl<V> Container for Radix<V> {
    fn size(&self) -> usize {
        Radix::size(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    fn routes() -> Radix<&'static str> {
        let radix = Radix::new();
        radix.insert("/api/users", "users");
        radix.insert("/api/users/admin", "admin");
        radix.insert("/static", "files");
        radix.insert("api/orders/", "orders");
        radix
    }

    #[test]
    fn paths_are_normalized() {
        let radix = routes();
        assert_eq!(radix.find("api//users"), Some("users"));
        assert_eq!(radix.find("/api/orders"), Some("orders"));
        assert_eq!(radix.find("/api"), None);
        assert!(!radix.insert("//", "nothing"));
        assert_eq!(radix.size(), 4);
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let radix = routes();
        assert_eq!(
            radix.iter().collect::<Vec<_>>(),
            vec!["/api/users", "/api/users/admin", "/api/orders", "/static"]
        );
    }

    #[test]
    fn counts_and_erase() {
        let radix = routes();
        assert_eq!(radix.count("/api"), 3);
        assert_eq!(radix.count("/api/users"), 2);
        assert_eq!(radix.count("/nope"), 0);
        assert_eq!(radix.count(""), 4);
        assert_eq!(radix.erase("/api/users"), 2);
        assert_eq!(radix.count("/api"), 1);
        assert_eq!(radix.iter().collect::<Vec<_>>(), vec!["/api/orders", "/static"]);
        // re-inserting goes after the surviving siblings
        radix.insert("/api/users", "again");
        assert_eq!(
            radix.iter().collect::<Vec<_>>(),
            vec!["/api/orders", "/api/users", "/static"]
        );
        assert_eq!(radix.erase("/"), 3);
        assert!(radix.is_empty());
    }

    #[test]
    fn deep_paths_do_not_exhaust_the_stack() {
        let worker = thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(|| {
                let radix = Radix::new();
                let deep = "a/".repeat(100_000);
                assert!(radix.insert(&deep, 1));
                assert!(radix.insert(&deep[..100_000], 2));
                assert_eq!(radix.count("a"), 2);
                assert_eq!(radix.find(&deep), Some(1));
                let paths = radix.iter().collect::<Vec<_>>();
                assert_eq!(
                    paths.iter().map(|p| p.len()).collect::<Vec<_>>(),
                    vec![100_000, 200_000]
                );
                assert_eq!(radix.erase(&deep[..150_000]), 1);
                assert_eq!(radix.count("a"), 1);
                radix.insert(&deep, 3);
                assert_eq!(radix.erase("a"), 2);
                assert!(radix.is_empty());
                radix.insert(&deep, 4);
            })
            .unwrap();
        worker.join().unwrap();
    }
}
