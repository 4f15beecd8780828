use async_trait::async_trait;
use models::{Record, RecordKey, Values};
use serde::Serialize;

use crate::errors::ServiceError;
use crate::query::ListParams;

/// One page of a list query plus the filtered count before paging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResult {
    pub data: Vec<Record>,
    pub total: usize,
}

/// Trait abstraction for the site's data provider.
/// The in-memory store is the only implementation today; the async
/// signatures leave room for a networked or persistent backend.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn list(&self, resource: &str, params: ListParams) -> ListResult;
    async fn get_one(&self, resource: &str, id: RecordKey) -> Result<Record, ServiceError>;
    async fn get_many(&self, resource: &str, ids: Vec<RecordKey>) -> Vec<Record>;
    async fn create(&self, resource: &str, values: Values) -> Result<Record, ServiceError>;
    async fn update(&self, resource: &str, id: RecordKey, values: Values) -> Result<Record, ServiceError>;
    async fn delete_one(&self, resource: &str, id: RecordKey) -> Result<Record, ServiceError>;
}
