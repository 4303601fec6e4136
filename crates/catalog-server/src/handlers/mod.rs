//! HTTP handlers

pub mod products;
pub mod root;

pub use root::{not_found, root};
