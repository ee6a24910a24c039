mod arena;
mod balance;
mod handle;
mod node;
mod raw_navi_tree_map;

pub use balance::{Avl, Balance, RedBlack};

pub(crate) use handle::Handle;
pub(crate) use raw_navi_tree_map::{RawNaviTreeMap, RemoveOutcome};
