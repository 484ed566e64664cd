use crate::arena::Index;
use crate::compare::{Compare, NaturalOrd};
use crate::entry::Entry;
use crate::splay_tree::node::Node;
use crate::splay_tree::tree;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::ops;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(0);

fn next_map_id() -> u64 {
    NEXT_MAP_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// A transient reference to a node of a specific [`SplayMap`] instance, or to that map's end
/// sentinel.
///
/// A handle does not own the node and does not borrow the map; it is resolved back into a
/// key-value pair with [`SplayMap::resolve`]. Two handles are equal precisely when they refer to
/// the same node of the same map, and the end handles of one map are equal to each other.
/// Removing a node invalidates the handles referring to it: resolving an invalidated handle
/// returns `None`, unless a later insertion reused the node's storage slot, in which case it
/// resolves to the entry occupying that slot.
///
/// # Examples
///
/// ```
/// use splay_collections::splay_tree::SplayMap;
///
/// let mut map = SplayMap::new();
/// let (handle, _) = map.insert(1, 'a');
///
/// assert_eq!(map.resolve(handle), Some((&1, &'a')));
/// assert_ne!(handle, map.end());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle {
    map_id: u64,
    node: Option<Index>,
}

/// An ordered map implemented using a splay tree over arena-allocated nodes.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that recently
/// accessed items are quick to access again: after every successful search and every insertion,
/// the affected node is "splayed" to the root with the zig, zig-zig, and zig-zag rotation cases.
/// Costs are amortized logarithmic over a sequence of operations; no worst-case height bound is
/// maintained.
///
/// Nodes live in an index-addressed arena, and the parent, left, and right links between them are
/// optional indices. Parent links are non-owning back-references; dropping or clearing the map
/// releases every node exactly once through the arena, never through a parent link.
///
/// There is no update-in-place: a stored value can only be replaced by removing its key and
/// inserting it again.
///
/// # Examples
///
/// ```
/// use splay_collections::splay_tree::SplayMap;
///
/// let mut map = SplayMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.remove(&0), Some((0, 1)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct SplayMap<T, U, C = NaturalOrd> {
    arena: tree::NodeArena<T, U>,
    root: tree::Tree,
    compare: C,
    id: u64,
}

impl<T, U> SplayMap<T, U> {
    /// Constructs a new, empty `SplayMap<T, U>` ordered by the keys' natural ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrd)
    }
}

impl<T, U, C> SplayMap<T, U, C> {
    /// Constructs a new, empty `SplayMap<T, U, C>` ordered by `compare`.
    ///
    /// The comparator must be a strict weak ordering over the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::with_comparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs));
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    ///
    /// assert_eq!(map.iter().next(), Some((&2, &'b')));
    /// ```
    pub fn with_comparator(compare: C) -> Self {
        SplayMap {
            arena: tree::NodeArena::new(),
            root: None,
            compare,
            id: next_map_id(),
        }
    }

    /// Inserts a key-value pair into the map and splays the affected node to the root.
    ///
    /// Returns a handle to the affected node and whether a new node was created. If the key is
    /// already present, the existing node is splayed and returned, the stored value is left
    /// unchanged, and `value` is discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// let (handle, inserted) = map.insert(1, 'a');
    /// assert!(inserted);
    /// assert_eq!(map.resolve(handle), Some((&1, &'a')));
    ///
    /// let (handle, inserted) = map.insert(1, 'b');
    /// assert!(!inserted);
    /// assert_eq!(map.resolve(handle), Some((&1, &'a')));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> (Handle, bool)
    where
        C: Compare<T>,
    {
        let (index, inserted) =
            tree::insert(&mut self.arena, &mut self.root, &self.compare, key, value);
        (
            Handle {
                map_id: self.id,
                node: Some(index),
            },
            inserted,
        )
    }

    /// Searches for a key and splays the deepest node visited to the root.
    ///
    /// On a hit, returns a handle to the matching node, which is now the root. On a miss, the
    /// last node visited is splayed anyway so that recently probed regions stay near the root,
    /// and the end handle is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 'a');
    ///
    /// let handle = map.find(&1);
    /// assert_eq!(map.resolve(handle), Some((&1, &'a')));
    /// assert_eq!(map.find(&2), map.end());
    /// ```
    pub fn find<V>(&mut self, key: &V) -> Handle
    where
        T: Borrow<V>,
        V: ?Sized,
        C: Compare<V>,
    {
        let node = tree::find(&mut self.arena, &mut self.root, &self.compare, key);
        Handle {
            map_id: self.id,
            node,
        }
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// The lookup phase splays the match to the root before detaching it, so a removal costs two
    /// splays.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.remove(&1), Some((1, 'a')));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: ?Sized,
        C: Compare<V>,
    {
        tree::remove(&mut self.arena, &mut self.root, &self.compare, key)
            .map(|Entry { key, value }| (key, value))
    }

    /// Removes a key-value pair from the map, returning whether a pair was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 'a');
    /// assert!(map.erase(&1));
    /// assert!(!map.erase(&1));
    /// ```
    pub fn erase<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: ?Sized,
        C: Compare<V>,
    {
        self.remove(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map. Note that `get` does not splay the
    /// tree in order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&'a'));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: ?Sized,
        C: Compare<V>,
    {
        tree::get(&self.arena, &self.root, &self.compare, key).map(|entry| &entry.value)
    }

    /// Checks if a key exists in the map. Note that `contains_key` does not splay the tree in
    /// order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 'a');
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: ?Sized,
        C: Compare<V>,
    {
        self.get(key).is_some()
    }

    /// Resolves a handle into the key-value pair it refers to.
    ///
    /// Returns `None` for the end handle, for a handle belonging to a different map, and for a
    /// handle whose node has been removed and whose slot has not been reused.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// let (handle, _) = map.insert(1, 'a');
    /// assert_eq!(map.resolve(handle), Some((&1, &'a')));
    /// assert_eq!(map.resolve(map.end()), None);
    /// ```
    pub fn resolve(&self, handle: Handle) -> Option<(&T, &U)> {
        if handle.map_id != self.id {
            return None;
        }
        handle
            .node
            .and_then(|index| self.arena.get(index))
            .map(|node| (&node.entry.key, &node.entry.value))
    }

    /// Returns the end handle of this map: the sentinel meaning "no node". It is the not-found
    /// result of [`find`](SplayMap::find) and never resolves to an entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map: SplayMap<u32, u32> = SplayMap::new();
    /// assert_eq!(map.find(&1), map.end());
    /// ```
    pub fn end(&self) -> Handle {
        Handle {
            map_id: self.id,
            node: None,
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &'a')));
    /// assert_eq!(iterator.next(), Some((&2, &'b')));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplayMapIter<'_, T, U> {
        SplayMapIter {
            arena: &self.arena,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<T, U> Default for SplayMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, C> IntoIterator for SplayMap<T, U, C> {
    type IntoIter = SplayMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            arena: self.arena,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U, C> IntoIterator for &'a SplayMap<T, U, C> {
    type IntoIter = SplayMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `SplayMap<T, U, C>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries. Nodes are
/// freed from the arena as they are yielded.
pub struct SplayMapIntoIter<T, U> {
    arena: tree::NodeArena<T, U>,
    current: Option<Index>,
    stack: Vec<Index>,
}

impl<T, U> Iterator for SplayMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.arena[index].left;
        }
        self.stack.pop().map(|index| {
            let Node {
                entry: Entry { key, value },
                right,
                ..
            } = self.arena.free(index);
            self.current = right;
            (key, value)
        })
    }
}

/// An iterator for `SplayMap<T, U, C>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct SplayMapIter<'a, T, U> {
    arena: &'a tree::NodeArena<T, U>,
    current: Option<Index>,
    stack: Vec<Index>,
}

impl<'a, T, U> Iterator for SplayMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.arena[index].left;
        }
        self.stack.pop().map(|index| {
            let node = &self.arena[index];
            self.current = node.right;
            (&node.entry.key, &node.entry.value)
        })
    }
}

impl<'a, T, U, V, C> ops::Index<&'a V> for SplayMap<T, U, C>
where
    T: Borrow<V>,
    V: ?Sized,
    C: Compare<V>,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<T, U, C> Serialize for SplayMap<T, U, C>
where
    T: Serialize,
    U: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

struct SplayMapVisitor<T, U, C> {
    marker: PhantomData<SplayMap<T, U, C>>,
}

impl<'de, T, U, C> Visitor<'de> for SplayMapVisitor<T, U, C>
where
    T: Deserialize<'de>,
    U: Deserialize<'de>,
    C: Compare<T> + Default,
{
    type Value = SplayMap<T, U, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = SplayMap::with_comparator(C::default());
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, T, U, C> Deserialize<'de> for SplayMap<T, U, C>
where
    T: Deserialize<'de>,
    U: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SplayMapVisitor {
            marker: PhantomData,
        })
    }
}
