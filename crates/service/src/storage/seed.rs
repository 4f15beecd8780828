//! Snapshot seeding
//!
//! A snapshot is a JSON object mapping resource names to arrays of flat
//! records, each with a numeric `id` unique within its resource.

use std::collections::HashSet;

use crate::errors::ServiceError;
use crate::storage::memory_store::Collections;

/// Site content bundled into the binary.
pub const DEFAULT_SNAPSHOT: &str = include_str!("../../data/mocks.json");

pub fn parse_snapshot(json: &str) -> Result<Collections, ServiceError> {
    let collections: Collections =
        serde_json::from_str(json).map_err(|e| ServiceError::Snapshot(e.to_string()))?;
    for (resource, records) in &collections {
        let mut seen = HashSet::new();
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            return Err(ServiceError::Snapshot(format!("duplicate id {} in \"{}\"", dup.id, resource)));
        }
    }
    Ok(collections)
}
