//! Data shapes shared by the store, the services and the HTTP layer.
//! - `record`: the untyped record model the query engine works on.
//! - `content`: typed views of the six site entities.
//! - `validation`: per-resource form rules.

pub mod errors;
pub mod record;
pub mod content;
pub mod validation;

pub use errors::{FieldError, ModelError};
pub use record::{Record, RecordKey, Scalar, Values};
