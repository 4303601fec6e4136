//! Storage layer
//!
//! Products live in process memory for the lifetime of the server.

pub mod memory;

pub use memory::ProductStore;
