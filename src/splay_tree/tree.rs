use crate::arena::{Arena, Index};
use crate::compare::Compare;
use crate::entry::Entry;
use crate::splay_tree::node::Node;
use std::borrow::Borrow;
use std::cmp::Ordering;

pub type NodeArena<T, U> = Arena<Node<T, U>>;
pub type Tree = Option<Index>;

/// Rotates `index` into its parent's position, preserving the in-order sequence.
///
/// The direction of the rotation follows from which child `index` is: a left child is promoted
/// by a right rotation and a right child by a left rotation. The grandparent's child slot (or
/// the root) is re-pointed at `index`, the child of `index` on the rotation-opposite side moves
/// to the demoted parent, and all parent back-links are updated.
///
/// # Panics
///
/// Panics if `index` has no parent. Rotating the root indicates a bug in the tree's own
/// bookkeeping, not bad input.
fn rotate<T, U>(arena: &mut NodeArena<T, U>, tree: &mut Tree, index: Index) {
    let parent = arena[index]
        .parent
        .expect("Expected a parent for the rotated node.");
    let grandparent = arena[parent].parent;
    let is_left_child = arena[parent].left == Some(index);

    let donated = if is_left_child {
        arena[index].right.take()
    } else {
        arena[index].left.take()
    };
    if is_left_child {
        arena[parent].left = donated;
        arena[index].right = Some(parent);
    } else {
        arena[parent].right = donated;
        arena[index].left = Some(parent);
    }
    if let Some(child) = donated {
        arena[child].parent = Some(parent);
    }
    arena[parent].parent = Some(index);
    arena[index].parent = grandparent;

    match grandparent {
        Some(grandparent) => {
            if arena[grandparent].left == Some(parent) {
                arena[grandparent].left = Some(index);
            } else {
                arena[grandparent].right = Some(index);
            }
        }
        None => *tree = Some(index),
    }
}

/// Rotates `index` up to the root using the zig, zig-zig, and zig-zag cases.
pub fn splay<T, U>(arena: &mut NodeArena<T, U>, tree: &mut Tree, index: Index) {
    while let Some(parent) = arena[index].parent {
        match arena[parent].parent {
            // Zig: the parent is the root.
            None => rotate(arena, tree, index),
            Some(grandparent) => {
                let node_is_left = arena[parent].left == Some(index);
                let parent_is_left = arena[grandparent].left == Some(parent);
                if node_is_left == parent_is_left {
                    // Zig-zig: rotate the parent first, then the node.
                    rotate(arena, tree, parent);
                    rotate(arena, tree, index);
                } else {
                    // Zig-zag: two rotations of the node in opposite directions.
                    rotate(arena, tree, index);
                    rotate(arena, tree, index);
                }
            }
        }
    }
}

/// Descends from the root looking for `key` and splays the deepest node visited.
///
/// On a hit the matching node ends up at the root and its index is returned. On a miss the last
/// node visited is splayed instead, keeping recently probed regions near the root, and `None` is
/// returned.
pub fn find<T, U, V, C>(
    arena: &mut NodeArena<T, U>,
    tree: &mut Tree,
    compare: &C,
    key: &V,
) -> Option<Index>
where
    T: Borrow<V>,
    V: ?Sized,
    C: Compare<V>,
{
    let mut curr = (*tree)?;
    loop {
        match compare.compare(key, arena[curr].entry.key.borrow()) {
            Ordering::Less => match arena[curr].left {
                Some(child) => curr = child,
                None => {
                    splay(arena, tree, curr);
                    return None;
                }
            },
            Ordering::Greater => match arena[curr].right {
                Some(child) => curr = child,
                None => {
                    splay(arena, tree, curr);
                    return None;
                }
            },
            Ordering::Equal => {
                splay(arena, tree, curr);
                return Some(curr);
            }
        }
    }
}

/// Inserts a key-value pair, splaying the affected node to the root.
///
/// Returns the index of the affected node and whether a new node was created. If the key is
/// already present the existing node is splayed, its value is left unchanged, and `value` is
/// dropped.
pub fn insert<T, U, C>(
    arena: &mut NodeArena<T, U>,
    tree: &mut Tree,
    compare: &C,
    key: T,
    value: U,
) -> (Index, bool)
where
    C: Compare<T>,
{
    let mut curr = match *tree {
        Some(index) => index,
        None => {
            let index = arena.allocate(Node::new(key, value, None));
            *tree = Some(index);
            return (index, true);
        }
    };
    loop {
        match compare.compare(&key, &arena[curr].entry.key) {
            Ordering::Equal => {
                splay(arena, tree, curr);
                return (curr, false);
            }
            Ordering::Less => match arena[curr].left {
                Some(child) => curr = child,
                None => {
                    let index = arena.allocate(Node::new(key, value, Some(curr)));
                    arena[curr].left = Some(index);
                    splay(arena, tree, index);
                    return (index, true);
                }
            },
            Ordering::Greater => match arena[curr].right {
                Some(child) => curr = child,
                None => {
                    let index = arena.allocate(Node::new(key, value, Some(curr)));
                    arena[curr].right = Some(index);
                    splay(arena, tree, index);
                    return (index, true);
                }
            },
        }
    }
}

/// Removes the node matching `key` and returns its entry.
///
/// The lookup phase splays the match to the root. The root is then detached and its subtrees are
/// rejoined: the maximum of the left subtree is splayed to that subtree's root and the right
/// subtree is hung beneath it.
pub fn remove<T, U, V, C>(
    arena: &mut NodeArena<T, U>,
    tree: &mut Tree,
    compare: &C,
    key: &V,
) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: ?Sized,
    C: Compare<V>,
{
    let target = find(arena, tree, compare, key)?;
    let Node {
        entry, left, right, ..
    } = arena.free(target);
    *tree = match left {
        Some(left_index) => {
            arena[left_index].parent = None;
            let mut left_tree = Some(left_index);
            let mut max = left_index;
            while let Some(child) = arena[max].right {
                max = child;
            }
            splay(arena, &mut left_tree, max);
            // The maximum has no right child after the splay.
            arena[max].right = right;
            if let Some(right_index) = right {
                arena[right_index].parent = Some(max);
            }
            Some(max)
        }
        None => {
            if let Some(right_index) = right {
                arena[right_index].parent = None;
            }
            right
        }
    };
    Some(entry)
}

/// Read-only lookup. Does not splay, so repeated calls do not restructure the tree.
pub fn get<'a, T, U, V, C>(
    arena: &'a NodeArena<T, U>,
    tree: &Tree,
    compare: &C,
    key: &V,
) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: ?Sized,
    C: Compare<V>,
{
    let mut curr = *tree;
    while let Some(index) = curr {
        let node = &arena[index];
        match compare.compare(key, node.entry.key.borrow()) {
            Ordering::Less => curr = node.left,
            Ordering::Greater => curr = node.right,
            Ordering::Equal => return Some(&node.entry),
        }
    }
    None
}
