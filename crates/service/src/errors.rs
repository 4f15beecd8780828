use models::RecordKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Item with id \"{id}\" not found in \"{resource}\"")]
    NotFound { resource: String, id: String },
    #[error(transparent)]
    Validation(#[from] models::ModelError),
    #[error("snapshot error: {0}")]
    Snapshot(String),
    #[error("no ids left in \"{resource}\"")]
    IdsExhausted { resource: String },
}

impl ServiceError {
    pub fn not_found(resource: &str, id: &RecordKey) -> Self {
        Self::NotFound { resource: resource.to_string(), id: id.to_string() }
    }
}
