//! Domain types and pure validation logic for the tree service.
//!
//! Nothing in this crate touches the database or HTTP.

pub mod error;
pub mod tree;
pub mod types;
