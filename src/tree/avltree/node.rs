use crate::error::{Error, Result};
use crate::tree::{Inserted, Removed};
use crate::utils::comparator::{compare, Comparator};
use log::trace;
use std::cmp::{self, Ordering};
use std::iter;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) count: usize,
    // nodes on the longest path down from here, this one included
    pub(crate) height: usize,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            count: 1,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    /// Left height minus right height.
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

pub(crate) fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

pub(crate) fn find<'a, T>(
    mut link: &'a Link<T>,
    value: &T,
    cmp: &Comparator<T>,
) -> Result<Option<&'a Node<T>>> {
    while let Some(node) = link {
        link = match compare(cmp, value, &node.value)? {
            Ordering::Less => &node.left,
            Ordering::Greater => &node.right,
            Ordering::Equal => return Ok(Some(&**node)),
        };
    }
    Ok(None)
}

/// Inserts below `link`. Nothing is restructured until the recursion has
/// succeeded, so an error leaves the tree as it was.
pub(crate) fn insert<T>(
    link: &mut Link<T>,
    value: T,
    allow_duplicates: bool,
    cmp: &Comparator<T>,
) -> Result<Inserted> {
    let node = match link {
        Some(node) => node,
        None => {
            *link = Some(Node::leaf(value));
            return Ok(Inserted::New);
        }
    };
    let inserted = match compare(cmp, &value, &node.value)? {
        Ordering::Less => insert(&mut node.left, value, allow_duplicates, cmp)?,
        Ordering::Greater => insert(&mut node.right, value, allow_duplicates, cmp)?,
        Ordering::Equal if allow_duplicates => {
            node.count += 1;
            return Ok(Inserted::Duplicate);
        }
        Ordering::Equal => {
            node.value = value;
            return Ok(Inserted::Replaced);
        }
    };
    if inserted == Inserted::New {
        rebalance(link);
    }
    Ok(inserted)
}

pub(crate) fn remove<T>(link: &mut Link<T>, value: &T, cmp: &Comparator<T>) -> Result<Removed> {
    let node = match link {
        Some(node) => node,
        None => return Err(Error::NotFound),
    };
    let removed = match compare(cmp, value, &node.value)? {
        Ordering::Less => remove(&mut node.left, value, cmp)?,
        Ordering::Greater => remove(&mut node.right, value, cmp)?,
        Ordering::Equal if node.count > 1 => {
            node.count -= 1;
            return Ok(Removed::Decremented);
        }
        Ordering::Equal => {
            unlink(link);
            return Ok(Removed::Removed);
        }
    };
    if removed == Removed::Removed {
        rebalance(link);
    }
    Ok(removed)
}

/// Replaces the node at `link` by its subtree minus the node itself. A node
/// with two children is replaced by its in-order successor.
fn unlink<T>(link: &mut Link<T>) {
    if let Some(mut node) = link.take() {
        *link = match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let (rest, mut successor) = take_min(right);
                successor.left = Some(left);
                successor.right = rest;
                Some(balance(successor))
            }
        };
    }
}

/// Detaches the leftmost node of a subtree, returning what is left of the
/// subtree and the detached node.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, Box<Node<T>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(balance(node)), min)
        }
    }
}

fn rebalance<T>(link: &mut Link<T>) {
    if let Some(node) = link.take() {
        *link = Some(balance(node));
    }
}

/// Restores `|balance| <= 1` at `node`, assuming both subtrees are already
/// balanced, and returns the new subtree root.
fn balance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let factor = node.balance_factor();
    if factor > 1 {
        if node.left.as_ref().map_or(0, |l| l.balance_factor()) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if factor < -1 {
        if node.right.as_ref().map_or(0, |r| r.balance_factor()) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut pivot = match node.right.take() {
        Some(pivot) => pivot,
        None => return node,
    };
    trace!("avl: rotating left");
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut pivot = match node.left.take() {
        Some(pivot) => pivot,
        None => return node,
    };
    trace!("avl: rotating right");
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

pub(crate) fn in_order<T: Clone>(link: &Link<T>, out: &mut Vec<T>) {
    if let Some(node) = link {
        in_order(&node.left, out);
        out.extend(iter::repeat(node.value.clone()).take(node.count));
        in_order(&node.right, out);
    }
}

/// Asserts ordering, cached heights and the balance bound below `link`,
/// returning the number of nodes.
pub(crate) fn check_invariants<T>(
    link: &Link<T>,
    lower: Option<&T>,
    upper: Option<&T>,
    cmp: &Comparator<T>,
) -> usize {
    let node = match link {
        Some(node) => node,
        None => return 0,
    };
    if let Some(lower) = lower {
        assert_eq!(
            cmp(lower, &node.value),
            Ordering::Less,
            "An AVL node is not greater than an ancestor it is right of"
        );
    }
    if let Some(upper) = upper {
        assert_eq!(
            cmp(&node.value, upper),
            Ordering::Less,
            "An AVL node is not less than an ancestor it is left of"
        );
    }
    assert!(node.count > 0, "An AVL node stores zero occurrences");
    assert_eq!(
        node.height,
        1 + cmp::max(height(&node.left), height(&node.right)),
        "An AVL node's cached height is stale"
    );
    assert!(
        node.balance_factor().abs() <= 1,
        "An AVL node's subtrees differ in height by more than one"
    );
    1 + check_invariants(&node.left, lower, Some(&node.value), cmp)
        + check_invariants(&node.right, Some(&node.value), upper, cmp)
}
