//! Machine images.

use crate::node::ImageRecord;
use crate::provider::Provider;
use serde::Serialize;
use serde_json::{Value, json};

/// A disk image record, normalized.
#[derive(Debug, Clone, Serialize)]
pub struct Machine {
    pub id: String,

    pub alias: String,

    pub name: String,

    pub provider: Provider,

    #[serde(skip)]
    placeholder: bool,
}

impl Machine {
    pub fn from_record(provider: Provider, record: &ImageRecord) -> Self {
        Self {
            id: record.id.clone(),
            alias: record.id.clone(),
            name: record.name.clone(),
            provider,
            placeholder: false,
        }
    }

    /// Stand-in for an image the provider no longer knows about.
    /// Placeholders never enter the cache.
    pub fn placeholder(image_id: impl Into<String>, provider: Provider) -> Self {
        let id = image_id.into();
        Self {
            alias: id.clone(),
            name: format!("Unknown image {id}"),
            id,
            provider,
            placeholder: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Caller-facing REST shape.
    pub fn json(&self) -> Value {
        json!({
            "id": self.id,
            "alias": self.alias,
            "name": self.name,
            "provider": self.provider.name(),
        })
    }
}

impl std::fmt::Display for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Machine {}", self.json())
    }
}
