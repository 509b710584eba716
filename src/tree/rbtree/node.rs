use crate::error::{Error, Result};
use crate::tree::{Inserted, Removed};
use crate::utils::comparator::{compare, Comparator};
use log::trace;
use std::cmp::{self, Ordering};
use std::iter;
use std::mem;

pub(crate) type NodeId = usize;

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    // logical duplicates collapsed into this node, never 0
    pub(crate) count: usize,
    pub(crate) red: bool,

    // red-black tree links, all indices into the owning arena
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(value: T, parent: Option<NodeId>) -> Self {
        Node {
            value,
            count: 1,
            red: true,
            parent,
            left: None,
            right: None,
        }
    }
}

/// The red-black engine: every node of one tree, stored densely and linked by
/// index. The arena owns the nodes; `parent` is only used to walk upwards.
///
/// Nothing in here is synchronized. Callers hold the tree lock.
#[derive(Debug)]
pub(crate) struct RawTree<T> {
    nodes: Vec<Node<T>>,
    root: Option<NodeId>,
}

impl<T> RawTree<T> {
    pub(crate) fn new() -> Self {
        RawTree {
            nodes: Vec::new(),
            root: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.map(|r| &self.nodes[r])
    }

    #[cfg(test)]
    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id]
    }

    #[cfg(test)]
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn is_red(&self, n: Option<NodeId>) -> bool {
        n.map_or(false, |n| self.nodes[n].red)
    }

    fn set_black(&mut self, n: Option<NodeId>) {
        if let Some(n) = n {
            self.nodes[n].red = false;
        }
    }

    pub(crate) fn find(&self, value: &T, cmp: &Comparator<T>) -> Result<Option<NodeId>> {
        let mut p = self.root;
        while let Some(n) = p {
            p = match compare(cmp, &self.nodes[n].value, value)? {
                Ordering::Greater => self.nodes[n].left,
                Ordering::Less => self.nodes[n].right,
                Ordering::Equal => return Ok(Some(n)),
            };
        }
        Ok(None)
    }

    pub(crate) fn count(&self, value: &T, cmp: &Comparator<T>) -> Result<usize> {
        Ok(self.find(value, cmp)?.map_or(0, |n| self.nodes[n].count))
    }

    pub(crate) fn insert(
        &mut self,
        value: T,
        allow_duplicates: bool,
        cmp: &Comparator<T>,
    ) -> Result<Inserted> {
        let mut parent = None;
        let mut go_left = false;
        let mut p = self.root;
        while let Some(n) = p {
            match compare(cmp, &self.nodes[n].value, &value)? {
                Ordering::Greater => {
                    go_left = true;
                    p = self.nodes[n].left;
                }
                Ordering::Less => {
                    go_left = false;
                    p = self.nodes[n].right;
                }
                Ordering::Equal => {
                    let node = &mut self.nodes[n];
                    if allow_duplicates {
                        node.count += 1;
                        return Ok(Inserted::Duplicate);
                    }
                    node.value = value;
                    return Ok(Inserted::Replaced);
                }
            }
            parent = Some(n);
        }

        let x = self.nodes.len();
        self.nodes.push(Node::new(value, parent));
        match parent {
            None => self.root = Some(x),
            Some(p) if go_left => self.nodes[p].left = Some(x),
            Some(p) => self.nodes[p].right = Some(x),
        }
        self.balance_insertion(x);
        Ok(Inserted::New)
    }

    pub(crate) fn remove(&mut self, value: &T, cmp: &Comparator<T>) -> Result<Removed> {
        let m = self.find(value, cmp)?.ok_or(Error::NotFound)?;
        if self.nodes[m].count > 1 {
            self.nodes[m].count -= 1;
            return Ok(Removed::Decremented);
        }

        // with two children, the smallest successor gives up its payload and
        // is unlinked in place of `m`
        let z = match (self.nodes[m].left, self.nodes[m].right) {
            (Some(_), Some(right)) => {
                let successor = self.minimum(right);
                self.swap_payload(m, successor);
                successor
            }
            _ => m,
        };

        debug_assert!(self.nodes[z].left.is_none() || self.nodes[z].right.is_none());
        let child = self.nodes[z].left.or(self.nodes[z].right);
        let parent = self.nodes[z].parent;
        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }
        self.replace_child(parent, z, child);

        if !self.nodes[z].red {
            self.balance_deletion(child, parent);
        }
        self.release(z);
        Ok(Removed::Removed)
    }

    /// Values in ascending order, each repeated by its multiplicity.
    pub(crate) fn in_order(&self, size_hint: usize) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(size_hint);
        let mut stack = Vec::new();
        let mut p = self.root;
        loop {
            while let Some(n) = p {
                stack.push(n);
                p = self.nodes[n].left;
            }
            match stack.pop() {
                Some(n) => {
                    let node = &self.nodes[n];
                    out.extend(iter::repeat(node.value.clone()).take(node.count));
                    p = node.right;
                }
                None => break,
            }
        }
        out
    }

    pub(crate) fn height(&self) -> usize {
        self.depth(self.root)
    }

    fn depth(&self, n: Option<NodeId>) -> usize {
        match n {
            Some(n) => {
                let node = &self.nodes[n];
                1 + cmp::max(self.depth(node.left), self.depth(node.right))
            }
            None => 0,
        }
    }

    fn minimum(&self, mut n: NodeId) -> NodeId {
        while let Some(l) = self.nodes[n].left {
            n = l;
        }
        n
    }

    fn swap_payload(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(hi);
        let (x, y) = (&mut head[lo], &mut tail[0]);
        mem::swap(&mut x.value, &mut y.value);
        mem::swap(&mut x.count, &mut y.count);
    }

    /// Points whatever referenced `old` from above (a parent or the root slot)
    /// at `new` instead.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                if self.nodes[p].left == Some(old) {
                    self.nodes[p].left = new;
                } else {
                    self.nodes[p].right = new;
                }
            }
        }
    }

    /// Drops an already unlinked node. The last node of the arena moves into
    /// the freed slot, so its neighbours are repointed.
    fn release(&mut self, z: NodeId) {
        let last = self.nodes.len() - 1;
        self.nodes.swap_remove(z);
        if z != last {
            let (parent, left, right) = {
                let moved = &self.nodes[z];
                (moved.parent, moved.left, moved.right)
            };
            self.replace_child(parent, last, Some(z));
            if let Some(l) = left {
                self.nodes[l].parent = Some(z);
            }
            if let Some(r) = right {
                self.nodes[r].parent = Some(z);
            }
        }
    }
}

// Red-black tree methods, all adapted from CLR
impl<T> RawTree<T> {
    fn rotate_left(&mut self, p: NodeId) {
        let right = match self.nodes[p].right {
            Some(r) => r,
            // there is no right successor to rotate left
            None => return,
        };
        let right_left = self.nodes[right].left;
        self.nodes[p].right = right_left;
        if let Some(rl) = right_left {
            self.nodes[rl].parent = Some(p);
        }

        let p_parent = self.nodes[p].parent;
        self.nodes[right].parent = p_parent;
        self.replace_child(p_parent, p, Some(right));
        self.nodes[right].left = Some(p);
        self.nodes[p].parent = Some(right);
    }

    fn rotate_right(&mut self, p: NodeId) {
        let left = match self.nodes[p].left {
            Some(l) => l,
            // there is no left successor to rotate right
            None => return,
        };
        let left_right = self.nodes[left].right;
        self.nodes[p].left = left_right;
        if let Some(lr) = left_right {
            self.nodes[lr].parent = Some(p);
        }

        let p_parent = self.nodes[p].parent;
        self.nodes[left].parent = p_parent;
        self.replace_child(p_parent, p, Some(left));
        self.nodes[left].right = Some(p);
        self.nodes[p].parent = Some(left);
    }

    fn balance_insertion(&mut self, mut x: NodeId) {
        self.nodes[x].red = true;

        loop {
            let mut x_parent = match self.nodes[x].parent {
                Some(p) if self.nodes[p].red => p,
                _ => break,
            };
            let x_parent_parent = match self.nodes[x_parent].parent {
                Some(g) => g,
                None => break,
            };

            if self.nodes[x_parent_parent].left == Some(x_parent) {
                let uncle = self.nodes[x_parent_parent].right;
                if self.is_red(uncle) {
                    trace!("insertion fixup: red uncle on the right, recoloring");
                    self.set_black(uncle);
                    self.nodes[x_parent].red = false;
                    self.nodes[x_parent_parent].red = true;
                    x = x_parent_parent;
                    continue;
                }
                if self.nodes[x_parent].right == Some(x) {
                    self.rotate_left(x_parent);
                    mem::swap(&mut x, &mut x_parent);
                }
                trace!("insertion fixup: black uncle on the right, rotating");
                self.nodes[x_parent].red = false;
                self.nodes[x_parent_parent].red = true;
                self.rotate_right(x_parent_parent);
            } else {
                let uncle = self.nodes[x_parent_parent].left;
                if self.is_red(uncle) {
                    trace!("insertion fixup: red uncle on the left, recoloring");
                    self.set_black(uncle);
                    self.nodes[x_parent].red = false;
                    self.nodes[x_parent_parent].red = true;
                    x = x_parent_parent;
                    continue;
                }
                if self.nodes[x_parent].left == Some(x) {
                    self.rotate_right(x_parent);
                    mem::swap(&mut x, &mut x_parent);
                }
                trace!("insertion fixup: black uncle on the left, rotating");
                self.nodes[x_parent].red = false;
                self.nodes[x_parent_parent].red = true;
                self.rotate_left(x_parent_parent);
            }
            break;
        }

        let root = self.root;
        self.set_black(root);
    }

    /// Restores black-height after a black node was unlinked. `x` is whatever
    /// now sits in the vacated slot (possibly nothing), `x_parent` owns that slot.
    fn balance_deletion(&mut self, mut x: Option<NodeId>, mut x_parent: Option<NodeId>) {
        while x != self.root && !self.is_red(x) {
            let xp = match x_parent {
                Some(p) => p,
                None => break,
            };

            if self.nodes[xp].left == x {
                let mut sibling = match self.nodes[xp].right {
                    Some(s) => s,
                    None => unreachable!("a node short of one black has no sibling"),
                };
                if self.nodes[sibling].red {
                    trace!("deletion fixup: red sibling on the right");
                    self.nodes[sibling].red = false;
                    self.nodes[xp].red = true;
                    self.rotate_left(xp);
                    sibling = match self.nodes[xp].right {
                        Some(s) => s,
                        None => unreachable!("rotation left the short node without a sibling"),
                    };
                }

                let s_left = self.nodes[sibling].left;
                let s_right = self.nodes[sibling].right;
                if !self.is_red(s_left) && !self.is_red(s_right) {
                    self.nodes[sibling].red = true;
                    x = Some(xp);
                    x_parent = self.nodes[xp].parent;
                    continue;
                }
                if !self.is_red(s_right) {
                    trace!("deletion fixup: near nephew red, rotating sibling");
                    self.set_black(s_left);
                    self.nodes[sibling].red = true;
                    self.rotate_right(sibling);
                    sibling = match self.nodes[xp].right {
                        Some(s) => s,
                        None => unreachable!("rotation left the short node without a sibling"),
                    };
                }
                trace!("deletion fixup: far nephew red, rotating parent");
                self.nodes[sibling].red = self.nodes[xp].red;
                self.nodes[xp].red = false;
                let s_right = self.nodes[sibling].right;
                self.set_black(s_right);
                self.rotate_left(xp);
                x = self.root;
                break;
            } else {
                // symmetric
                let mut sibling = match self.nodes[xp].left {
                    Some(s) => s,
                    None => unreachable!("a node short of one black has no sibling"),
                };
                if self.nodes[sibling].red {
                    trace!("deletion fixup: red sibling on the left");
                    self.nodes[sibling].red = false;
                    self.nodes[xp].red = true;
                    self.rotate_right(xp);
                    sibling = match self.nodes[xp].left {
                        Some(s) => s,
                        None => unreachable!("rotation left the short node without a sibling"),
                    };
                }

                let s_left = self.nodes[sibling].left;
                let s_right = self.nodes[sibling].right;
                if !self.is_red(s_left) && !self.is_red(s_right) {
                    self.nodes[sibling].red = true;
                    x = Some(xp);
                    x_parent = self.nodes[xp].parent;
                    continue;
                }
                if !self.is_red(s_left) {
                    trace!("deletion fixup: near nephew red, rotating sibling");
                    self.set_black(s_right);
                    self.nodes[sibling].red = true;
                    self.rotate_left(sibling);
                    sibling = match self.nodes[xp].left {
                        Some(s) => s,
                        None => unreachable!("rotation left the short node without a sibling"),
                    };
                }
                trace!("deletion fixup: far nephew red, rotating parent");
                self.nodes[sibling].red = self.nodes[xp].red;
                self.nodes[xp].red = false;
                let s_left = self.nodes[sibling].left;
                self.set_black(s_left);
                self.rotate_right(xp);
                x = self.root;
                break;
            }
        }
        self.set_black(x);
    }

    /// Asserts every structural invariant and returns the black-height of the
    /// tree (absent leaves count as one black node).
    pub(crate) fn check_invariants(&self, cmp: &Comparator<T>) -> usize {
        match self.root {
            None => {
                assert!(self.nodes.is_empty(), "An empty tree still owned nodes");
                1
            }
            Some(root) => {
                let root_deref = &self.nodes[root];
                assert!(root_deref.parent.is_none(), "The root had a `parent` node");
                assert!(!root_deref.red, "The root was red");
                self.check_subtree(root, None, None, cmp)
            }
        }
    }

    fn check_subtree(
        &self,
        t: NodeId,
        lower: Option<NodeId>,
        upper: Option<NodeId>,
        cmp: &Comparator<T>,
    ) -> usize {
        let t_deref = &self.nodes[t];
        assert!(t_deref.count >= 1, "A node held no elements");
        if let Some(lower) = lower {
            assert_eq!(
                cmp(&self.nodes[lower].value, &t_deref.value),
                Ordering::Less,
                "A node was not greater than an ancestor it sits right of"
            );
        }
        if let Some(upper) = upper {
            assert_eq!(
                cmp(&t_deref.value, &self.nodes[upper].value),
                Ordering::Less,
                "A node was not less than an ancestor it sits left of"
            );
        }

        let mut left_height = 1;
        let mut right_height = 1;
        if let Some(l) = t_deref.left {
            let l_deref = &self.nodes[l];
            assert_eq!(
                l_deref.parent,
                Some(t),
                "A node's `left` child did not point back to it as its `parent` node"
            );
            assert!(
                !(t_deref.red && l_deref.red),
                "A red node had a red `left` child"
            );
            left_height = self.check_subtree(l, lower, Some(t), cmp);
        }
        if let Some(r) = t_deref.right {
            let r_deref = &self.nodes[r];
            assert_eq!(
                r_deref.parent,
                Some(t),
                "A node's `right` child did not point back to it as its `parent` node"
            );
            assert!(
                !(t_deref.red && r_deref.red),
                "A red node had a red `right` child"
            );
            right_height = self.check_subtree(r, Some(t), upper, cmp);
        }
        assert_eq!(
            left_height, right_height,
            "Two paths below a node crossed a different number of black nodes"
        );
        left_height + if t_deref.red { 0 } else { 1 }
    }
}
