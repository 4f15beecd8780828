use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use models::content::canonical_resource;
use models::{Record, RecordKey, Values};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::provider::{DataProvider, ListResult};
use crate::query::eval::{compare_records, matches_all};
use crate::query::ListParams;
use crate::storage::seed;

/// Resource name -> records in insertion order.
pub type Collections = HashMap<String, Vec<Record>>;

/// In-memory query engine over named collections.
///
/// Cloning shares the same collections. Every operation takes the lock
/// once for its whole run, so operations never observe each other half
/// done. Nothing is written back to disk.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new(collections: Collections) -> Self {
        Self { inner: Arc::new(RwLock::new(collections)) }
    }

    /// Build from a JSON snapshot `{resource: [record, ...]}`.
    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        Ok(Self::new(seed::parse_snapshot(json)?))
    }

    /// Store seeded with the snapshot bundled into the binary.
    pub fn seeded() -> Result<Self, ServiceError> {
        Self::from_json(seed::DEFAULT_SNAPSHOT)
    }

    /// Load a snapshot file.
    pub async fn from_snapshot_file<P: AsRef<Path>>(path: P) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let bytes = fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::Snapshot(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&bytes)
    }

    /// `(resource, record count)` pairs, sorted by name.
    pub async fn summary(&self) -> Vec<(String, usize)> {
        let map = self.inner.read().await;
        let mut out: Vec<_> = map.iter().map(|(k, v)| (k.clone(), v.len())).collect();
        out.sort();
        out
    }

    /// Filter, sort and page one collection. A missing collection reads as empty.
    pub async fn list(&self, resource: &str, params: ListParams) -> ListResult {
        let resource = canonical_resource(resource);
        let map = self.inner.read().await;
        let mut items: Vec<&Record> = map
            .get(resource)
            .map(|records| records.iter().filter(|r| matches_all(r, &params.filters)).collect())
            .unwrap_or_default();

        // sort_by 是稳定排序：完全相同的键保持插入顺序
        if !params.sorters.is_empty() {
            items.sort_by(|a, b| compare_records(a, b, &params.sorters));
        }

        let total = items.len();
        let window = params.pagination.unwrap_or_default().window(total);
        let data: Vec<Record> = items[window].iter().map(|r| (*r).clone()).collect();
        debug!(resource, total, returned = data.len(), filters = params.filters.len(), "list");
        ListResult { data, total }
    }

    pub async fn get_one(&self, resource: &str, id: RecordKey) -> Result<Record, ServiceError> {
        let resource = canonical_resource(resource);
        let map = self.inner.read().await;
        map.get(resource)
            .and_then(|records| records.iter().find(|r| id.matches(r.id)))
            .cloned()
            .ok_or_else(|| ServiceError::not_found(resource, &id))
    }

    /// Records whose id is among `ids`, in collection order. Unknown ids are skipped.
    pub async fn get_many(&self, resource: &str, ids: Vec<RecordKey>) -> Vec<Record> {
        let resource = canonical_resource(resource);
        let wanted: HashSet<&str> = ids.iter().map(RecordKey::as_str).collect();
        let map = self.inner.read().await;
        map.get(resource)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| wanted.contains(r.id.to_string().as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append a record with id `max(id) + 1`, or 1 for an empty collection.
    /// Values are stored as given; validation belongs to the caller.
    pub async fn create(&self, resource: &str, values: Values) -> Result<Record, ServiceError> {
        let resource = canonical_resource(resource);
        let mut map = self.inner.write().await;
        let records = map.entry(resource.to_string()).or_default();
        let id = match records.iter().map(|r| r.id).max() {
            None => 1,
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| ServiceError::IdsExhausted { resource: resource.to_string() })?,
        };
        let record = Record::from_values(id, values);
        records.push(record.clone());
        info!(resource, id, "record created");
        Ok(record)
    }

    /// Shallow-merge `values` into the record; its position does not change.
    pub async fn update(&self, resource: &str, id: RecordKey, values: Values) -> Result<Record, ServiceError> {
        let resource = canonical_resource(resource);
        let mut map = self.inner.write().await;
        let record = map
            .get_mut(resource)
            .and_then(|records| records.iter_mut().find(|r| id.matches(r.id)))
            .ok_or_else(|| ServiceError::not_found(resource, &id))?;
        record.merge(values);
        info!(resource, id = record.id, "record updated");
        Ok(record.clone())
    }

    pub async fn delete_one(&self, resource: &str, id: RecordKey) -> Result<Record, ServiceError> {
        let resource = canonical_resource(resource);
        let mut map = self.inner.write().await;
        let records = map
            .get_mut(resource)
            .ok_or_else(|| ServiceError::not_found(resource, &id))?;
        let index = records
            .iter()
            .position(|r| id.matches(r.id))
            .ok_or_else(|| ServiceError::not_found(resource, &id))?;
        let removed = records.remove(index);
        info!(resource, id = removed.id, "record deleted");
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl DataProvider for MemoryStore {
    async fn list(&self, resource: &str, params: ListParams) -> ListResult { self.list(resource, params).await }
    async fn get_one(&self, resource: &str, id: RecordKey) -> Result<Record, ServiceError> { self.get_one(resource, id).await }
    async fn get_many(&self, resource: &str, ids: Vec<RecordKey>) -> Vec<Record> { self.get_many(resource, ids).await }
    async fn create(&self, resource: &str, values: Values) -> Result<Record, ServiceError> { self.create(resource, values).await }
    async fn update(&self, resource: &str, id: RecordKey, values: Values) -> Result<Record, ServiceError> { self.update(resource, id, values).await }
    async fn delete_one(&self, resource: &str, id: RecordKey) -> Result<Record, ServiceError> { self.delete_one(resource, id).await }
}
