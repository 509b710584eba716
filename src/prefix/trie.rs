use crate::utils::{Container, Snapshot};
use log::debug;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::mem;

struct Node<V> {
    // insertions whose key passes through or ends at this node
    count: usize,
    value: Option<V>,
    children: BTreeMap<char, Node<V>>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Node {
            count: 0,
            value: None,
            children: BTreeMap::new(),
        }
    }

    fn descend(&self, key: &str) -> Option<&Node<V>> {
        key.chars()
            .try_fold(self, |node, c| node.children.get(&c))
    }

    /// Drops everything under the path `key` and returns how many insertions
    /// went with it. Ancestors left without any insertion are pruned.
    fn erase(&mut self, key: &str) -> usize {
        let removed = match self.descend(key) {
            Some(target) if target.count > 0 => target.count,
            _ => return 0,
        };
        let mut node = self;
        for c in key.chars() {
            node.count -= removed;
            if node.children.get(&c).map_or(false, |child| child.count == removed) {
                node.children.remove(&c);
                return removed;
            }
            node = match node.children.get_mut(&c) {
                Some(child) => child,
                None => return removed,
            };
        }
        // only the empty key reaches here, and it names the root
        *node = Node::new();
        removed
    }

    /// Stored keys in lexicographic order. The walk keeps one child iterator
    /// per level instead of recursing, so key length is not bounded by the
    /// call stack.
    fn collect_keys(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.value.is_some() {
            out.push(String::new());
        }
        let mut prefix = String::new();
        let mut levels = vec![self.children.iter()];
        while let Some(level) = levels.last_mut() {
            match level.next() {
                Some((c, child)) => {
                    prefix.push(*c);
                    if child.value.is_some() {
                        out.push(prefix.clone());
                    }
                    levels.push(child.children.iter());
                }
                None => {
                    levels.pop();
                    prefix.pop();
                }
            }
        }
        out
    }
}

impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        // unlink descendants onto a heap stack so a deep chain is freed
        // without one stack frame per level
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

/// A character trie mapping string keys to values.
///
/// Every node counts the insertions that passed through it, so the count of a
/// prefix is the number of insertions of keys starting with it. Inserting the
/// same key twice counts twice.
pub struct Trie<V> {
    root: Mutex<Node<V>>,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Trie {
            root: Mutex::new(Node::new()),
        }
    }

    /// Stores `value` under `key`, overwriting any value already there.
    pub fn insert(&self, key: &str, value: V) {
        let mut root = self.root.lock();
        let mut node = &mut *root;
        node.count += 1;
        for c in key.chars() {
            node = node.children.entry(c).or_insert_with(Node::new);
            node.count += 1;
        }
        node.value = Some(value);
    }

    /// Removes every key starting with `prefix` and returns how many
    /// insertions were dropped. The empty prefix clears the trie.
    pub fn erase(&self, prefix: &str) -> usize {
        let removed = self.root.lock().erase(prefix);
        if removed > 0 {
            debug!("erased {} insertions under prefix {:?}", removed, prefix);
        }
        removed
    }

    /// Insertions of keys starting with `prefix`; the empty prefix counts all.
    pub fn count(&self, prefix: &str) -> usize {
        self.root.lock().descend(prefix).map_or(0, |node| node.count)
    }

    /// The value stored under exactly `key`.
    pub fn find(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.root
            .lock()
            .descend(key)
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

    /// Stored keys in lexicographic order.
    pub fn iter(&self) -> Snapshot<String> {
        Snapshot::new(self.root.lock().collect_keys())
    }
}

impl<V> Container for Trie<V> {
    fn size(&self) -> usize {
        Trie::size(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    fn sample() -> Trie<u32> {
        let trie = Trie::new();
        trie.insert("tea", 1);
        trie.insert("ten", 2);
        trie.insert("to", 3);
        trie.insert("inn", 4);
        trie
    }

    #[test]
    fn prefix_counts() {
        let trie = sample();
        assert_eq!(trie.size(), 4);
        assert_eq!(trie.count(""), 4);
        assert_eq!(trie.count("t"), 3);
        assert_eq!(trie.count("te"), 2);
        assert_eq!(trie.count("tea"), 1);
        assert_eq!(trie.count("x"), 0);
    }

    #[test]
    fn find_needs_the_exact_key() {
        let trie = sample();
        assert_eq!(trie.find("ten"), Some(2));
        assert_eq!(trie.find("te"), None);
        assert_eq!(trie.find("tent"), None);
        trie.insert("ten", 20);
        assert_eq!(trie.find("ten"), Some(20));
        assert_eq!(trie.count("ten"), 2);
        assert_eq!(trie.size(), 5);
    }

    #[test]
    fn keys_come_out_sorted() {
        let trie = sample();
        trie.insert("te", 9);
        assert_eq!(
            trie.iter().collect::<Vec<_>>(),
            vec!["inn", "te", "tea", "ten", "to"]
        );
    }

    #[test]
    fn erase_removes_the_whole_prefix() {
        let trie = sample();
        assert_eq!(trie.erase("te"), 2);
        assert_eq!(trie.size(), 2);
        assert_eq!(trie.count("t"), 1);
        assert_eq!(trie.find("tea"), None);
        assert_eq!(trie.iter().collect::<Vec<_>>(), vec!["inn", "to"]);
        assert_eq!(trie.erase("zz"), 0);
        assert_eq!(trie.erase("to"), 1);
        assert_eq!(trie.iter().collect::<Vec<_>>(), vec!["inn"]);
        assert_eq!(trie.erase(""), 1);
        assert!(trie.is_empty());
    }

    #[test]
    fn unicode_keys() {
        let trie = Trie::new();
        trie.insert("日本", "ja");
        trie.insert("日本語", "lang");
        assert_eq!(trie.count("日"), 2);
        assert_eq!(trie.find("日本語"), Some("lang"));
        trie.clear();
        assert_eq!(trie.count(""), 0);
    }

    #[test]
    fn very_long_keys_do_not_exhaust_the_stack() {
        let worker = thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(|| {
                let trie = Trie::new();
                let long = "a".repeat(200_000);
                trie.insert(&long, 1);
                trie.insert(&long[..100_000], 2);
                assert_eq!(trie.count("a"), 2);
                assert_eq!(trie.find(&long), Some(1));
                let keys = trie.iter().collect::<Vec<_>>();
                assert_eq!(
                    keys.iter().map(|k| k.len()).collect::<Vec<_>>(),
                    vec![100_000, 200_000]
                );
                assert_eq!(trie.erase(&long[..150_000]), 1);
                assert_eq!(trie.count("a"), 1);
                trie.insert(&long, 3);
                assert_eq!(trie.erase("a"), 2);
                assert!(trie.is_empty());
                trie.insert(&long, 4);
                // dropped here with a 200k-deep chain still in place
            })
            .unwrap();
        worker.join().unwrap();
    }
}
