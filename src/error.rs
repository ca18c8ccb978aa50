//! Outcome types returned by the core pipeline.

use thiserror::Error;

use crate::schema::SchemaError;

pub type Result<T> = std::result::Result<T, MergeError>;

/// Failure of a pipeline run. A successful run is simply `Ok(table)`.
#[derive(Error, Debug)]
pub enum MergeError {
    /// A source table lacks required columns; nothing past validation ran.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Anything else that went wrong while loading, joining or resolving.
    #[error(transparent)]
    Processing(#[from] anyhow::Error),
}

impl MergeError {
    pub fn is_schema(&self) -> bool {
        matches!(self, MergeError::Schema(_))
    }
}
