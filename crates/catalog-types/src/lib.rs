//! Catalog Types - Pure type definitions shared by the catalog service
//!
//! This crate contains only plain data types and their JSON shape, with no
//! async runtime or HTTP dependencies.

pub mod message;
pub mod product;

pub use message::*;
pub use product::*;
