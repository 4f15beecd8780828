#![cfg(test)]
use models::{Record, Scalar, Values};

use crate::storage::memory_store::MemoryStore;

/// `services` = [{id:1,title:"A",category:"coding"},{id:2,title:"B",category:"revenue"}]
pub fn services_store() -> MemoryStore {
    MemoryStore::from_json(
        r#"{"services": [
            {"id": 1, "title": "A", "category": "coding"},
            {"id": 2, "title": "B", "category": "revenue"}
        ]}"#,
    )
    .expect("fixture snapshot")
}

pub fn values(pairs: &[(&str, &str)]) -> Values {
    pairs.iter().map(|(k, v)| (k.to_string(), Scalar::from(*v))).collect()
}

pub fn titles(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.field("title").map(|v| v.as_text().into_owned()).unwrap_or_default())
        .collect()
}
