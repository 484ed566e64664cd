//! Fast, but limited allocator.

use std::mem;
use std::ops;

/// A stable index into an [`Arena`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Index {
    slot: usize,
}

#[cfg(test)]
impl Index {
    pub(crate) fn from_slot(slot: usize) -> Self {
        Index { slot }
    }
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Index>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// Objects live in a dense `Vec` and are addressed by `Index` values that stay valid until the
/// object is freed. Freed slots are chained into a free list and reused by later allocations.
/// All remaining objects are destroyed when the arena is destroyed. The underlying container is
/// simply a `Vec` so the code itself is very simple and uses no unsafe code.
///
/// # Examples
///
/// ```
/// use splay_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct Arena<T> {
    blocks: Vec<Block<T>>,
    head: Option<Index>,
    size: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            blocks: Vec::new(),
            head: None,
            size: 0,
        }
    }

    /// Allocates an object in the arena and returns an `Index`. The `Index` can later be used to
    /// retrieve mutable and immutable references to the object, and to deallocate the object.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Index {
        self.size += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Index {
                    slot: self.blocks.len() - 1,
                }
            }
            Some(index) => {
                let vacant_block =
                    mem::replace(&mut self.blocks[index.slot], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_index) => {
                        self.head = next_index;
                        index
                    }
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            }
        }
    }

    /// Deallocates an object in the arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if `index` corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, index: Index) -> T {
        if index.slot >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        match mem::replace(&mut self.blocks[index.slot], Block::Vacant(self.head)) {
            Block::Vacant(next_index) => {
                self.blocks[index.slot] = Block::Vacant(next_index);
                panic!("Error: attempting to free vacant block.");
            }
            Block::Occupied(value) => {
                self.size -= 1;
                self.head = Some(index);
                value
            }
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the index does
    /// not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, index: Index) -> Option<&T> {
        match self.blocks.get(index.slot) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the index does
    /// not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// *arena.get_mut(x).unwrap() = 1;
    /// assert_eq!(arena.get(x), Some(&1));
    /// ```
    pub fn get_mut(&mut self, index: Index) -> Option<&mut T> {
        match self.blocks.get_mut(index.slot) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of objects currently allocated in the arena.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the arena holds no objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Destroys every object in the arena and resets it to its initial state.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.size = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ops::Index<Index> for Arena<T> {
    type Output = T;

    fn index(&self, index: Index) -> &Self::Output {
        self.get(index).expect("Error: index out of bounds.")
    }
}

impl<T> ops::IndexMut<Index> for Arena<T> {
    fn index_mut(&mut self, index: Index) -> &mut Self::Output {
        self.get_mut(index).expect("Error: index out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Index};

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: Arena<u32> = Arena::new();
        arena.free(Index::from_slot(0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        arena.free(index);
        arena.free(index);
    }

    #[test]
    fn test_allocate() {
        let mut arena = Arena::new();
        assert_eq!(arena.allocate(0), Index::from_slot(0));
        assert_eq!(arena.allocate(0), Index::from_slot(1));
        assert_eq!(arena.allocate(0), Index::from_slot(2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = Arena::new();
        let index = arena.allocate(1);
        assert_eq!(arena.free(index), 1);
        assert_eq!(arena.allocate(2), index);
        assert_eq!(arena.get(index), Some(&2));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_get_invalid_block() {
        let arena: Arena<u32> = Arena::new();
        assert_eq!(arena.get(Index::from_slot(0)), None);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        arena.free(index);
        assert_eq!(arena.get(index), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        *arena.get_mut(index).unwrap() = 1;
        assert_eq!(arena.get(index), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let index = arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(index), None);
    }
}
