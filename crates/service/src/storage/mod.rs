//! Storage for the service layer
//!
//! The in-memory engine and the snapshot it is seeded from. Nothing here
//! persists across restarts.

pub mod memory_store;
pub mod seed;
