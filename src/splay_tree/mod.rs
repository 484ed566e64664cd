//! Self-adjusting binary search tree with the additional property that recently accessed elements
//! are quick to access again. Nodes live in an index-addressed arena and carry non-owning parent
//! back-links, so rotations are O(1) and teardown never follows a parent edge.

mod map;
mod node;
mod tree;

pub use self::map::{Handle, SplayMap, SplayMapIntoIter, SplayMapIter};
