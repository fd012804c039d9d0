//! Error types shared across the provider crates.

use crate::provider::Provider;
use thiserror::Error;

/// Errors produced while normalizing provider responses.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("node {id} from {provider} is missing required field `{field}`")]
    MissingNodeField {
        provider: Provider,
        id: String,
        field: &'static str,
    },

    #[error("image not found: {0}")]
    ImageNotFound(String),

    #[error("size not found: {0}")]
    SizeNotFound(String),

    #[error("driver error: {0}")]
    Driver(#[from] anyhow::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
