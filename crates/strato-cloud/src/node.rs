//! Raw SDK response shapes.
//!
//! These mirror what the provider SDK hands back once it has already done
//! the network round-trip. The SDKs report absent string fields either by
//! omitting the key or by sending an empty string; the accessors below
//! treat both as missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A provider SDK's representation of a running compute instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub public_ips: Vec<String>,

    /// Opaque provider metadata. Known keys: `imageId`, `instancetype`
    /// (EC2 family), `flavorId` (OpenStack), `dns_name`, `status`, `task`,
    /// `metadata`, `power`.
    #[serde(default)]
    pub extra: HashMap<String, Value>,
}

impl Node {
    /// String-valued `extra` entry; empty strings count as absent.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        extra_str(&self.extra, key)
    }
}

/// Shared lookup for the `extra` maps carried by nodes and instances.
pub(crate) fn extra_str<'a>(extra: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
    extra
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// A provider SDK's representation of an instance size/flavor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeRecord {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub price: f64,

    /// RAM in MB.
    #[serde(default)]
    pub ram: u32,

    /// Disk in GB.
    #[serde(default)]
    pub disk: u32,

    #[serde(default)]
    pub bandwidth: Option<f64>,

    #[serde(default)]
    pub extra: HashMap<String, Value>,
}

impl SizeRecord {
    /// CPU count from `extra`, tolerating integers and numeric strings.
    /// Flavors without a usable value report 0.
    pub fn cpu(&self) -> u32 {
        match self.extra.get("cpu") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0) as u32,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// A provider SDK's representation of a disk image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub name: String,
}
