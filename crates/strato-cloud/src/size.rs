//! Instance sizes (flavors).

use crate::node::SizeRecord;
use crate::provider::Provider;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;

/// An instance size/flavor, normalized.
///
/// Every field is copied out of the SDK record at construction; nothing
/// here keeps the record alive, so serialization stays total after cache
/// resets.
#[derive(Debug, Clone, Serialize)]
pub struct Size {
    pub id: String,

    pub name: String,

    pub price: f64,

    /// RAM in MB.
    pub ram: u32,

    /// CPU count; 0 when the provider does not report one.
    pub cpu: u32,

    /// Disk in GB.
    pub disk: u32,

    pub bandwidth: Option<f64>,

    pub provider: Provider,

    pub extra: HashMap<String, Value>,
}

impl Size {
    pub fn from_record(provider: Provider, record: &SizeRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            price: record.price,
            ram: record.ram,
            cpu: record.cpu(),
            disk: record.disk,
            bandwidth: record.bandwidth,
            provider,
            extra: record.extra.clone(),
        }
    }

    /// Caller-facing REST shape. `id` carries the human-readable name and
    /// `alias` the provider id; consumers key on `alias`.
    pub fn json(&self) -> Value {
        json!({
            "id": self.name,
            "alias": self.id,
            "name": self.name,
            "cpu": self.cpu,
            "ram": self.ram,
            "disk": self.disk,
            "bandwidth": self.bandwidth,
            "price": self.price,
        })
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Size {}", self.json())
    }
}
