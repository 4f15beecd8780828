//! Service layer: the in-memory query engine and the site content logic on top of it.
//! - `query` holds the declarative filter/sort/page parameters.
//! - `storage` holds the engine (`MemoryStore`) and its snapshot seeding.
//! - `content_service` validates form input before it reaches the store.

pub mod errors;
pub mod pagination;
pub mod query;
pub mod provider;
pub mod storage;
pub mod content_service;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use provider::{DataProvider, ListResult};
pub use storage::memory_store::MemoryStore;
