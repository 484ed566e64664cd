//! An ordered map implemented using a self-adjusting binary search tree (splay tree) over
//! arena-allocated nodes. Insertion, exact lookup, and removal cost amortized logarithmic time,
//! and recently touched keys are biased toward the root so that temporally clustered access
//! patterns become cheap over time.

pub mod arena;
pub mod compare;
mod entry;
pub mod splay_tree;
