//! Navigable sorted map collections for Rust.
//!
//! This crate provides [`NaviTreeMap`], an ordered map built on a self-balancing
//! binary search tree with a pluggable balancing strategy ([`RedBlack`] or
//! [`Avl`]) and full navigation support:
//!
//! - [`floor_key`](NaviTreeMap::floor_key) / [`ceiling_key`](NaviTreeMap::ceiling_key) /
//!   [`lower_key`](NaviTreeMap::lower_key) / [`higher_key`](NaviTreeMap::higher_key) -
//!   O(log n) predecessor/successor queries
//! - [`sub_map`](NaviTreeMap::sub_map) / [`head_map`](NaviTreeMap::head_map) /
//!   [`tail_map`](NaviTreeMap::tail_map) / [`descending_map`](NaviTreeMap::descending_map) -
//!   live, non-copying range views over the backing tree
//! - [`cursor_mut`](NaviTreeMap::cursor_mut) - bidirectional traversal with
//!   removal through the cursor
//!
//! # Example
//!
//! ```
//! use navi_tree::NaviTreeMap;
//!
//! let mut scores: NaviTreeMap<i64, i64> = NaviTreeMap::new();
//! scores.put(3, 30);
//! scores.put(8, 80);
//! scores.put(5, 50);
//!
//! // Absent keys come back as the configurable default return value (0 here).
//! assert_eq!(scores.get(&4), 0);
//! assert_eq!(scores.get(&5), 50);
//!
//! // Navigation queries (O(log n)).
//! assert_eq!(scores.floor_key(&6), 5);
//! assert_eq!(scores.ceiling_key(&6), 8);
//!
//! // Range views stay live over the backing tree.
//! let head = scores.head_map(8, false);
//! let keys: Vec<i64> = head.keys().copied().collect();
//! assert_eq!(keys, [3, 5]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Two balancing strategies** - Red-black (default) or AVL, chosen as a type
//!   parameter with no runtime dispatch
//! - **Sentinel-based absence** - A per-map default return value stands in for
//!   "absent" so scalar-valued maps never box or branch on `Option` in hot lookups
//! - **Custom orderings** - Any [`Comparator`] (natural order by default)
//!
//! # Implementation
//!
//! Nodes live in a slot arena addressed by compact handles; `left`/`right` are
//! owning handles and `parent` is a plain back-reference, so rotations are O(1)
//! pointer surgery with no reference cycles. Values are stored in a second arena
//! to keep node links and value mutation on disjoint borrows.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: We have to allow unsafe code in order to hand out `&mut V` through the
// mutable iterators and cursor while node links stay borrowed.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod raw;

pub mod navi_tree_map;

pub use comparator::{Comparator, Natural};
pub use navi_tree_map::NaviTreeMap;
pub use raw::{Avl, Balance, RedBlack};
