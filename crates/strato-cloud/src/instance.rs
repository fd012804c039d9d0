//! Normalized compute instances.

use crate::cache::CloudCache;
use crate::error::{CloudError, Result};
use crate::machine::Machine;
use crate::node::{self, Node};
use crate::provider::Provider;
use crate::size::Size;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// A running compute instance, normalized from a provider node response.
///
/// An instance is associated with at most one [`Size`] and one [`Machine`],
/// both shared through the process-wide cache.
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    pub id: String,

    pub alias: String,

    pub name: String,

    /// Public IP, derived per provider at construction.
    pub ip: Option<String>,

    /// Backing image id, from `extra["imageId"]`.
    pub image_id: String,

    /// Provider-side size identifier, where the node reports one.
    pub size_id: Option<String>,

    pub provider: Provider,

    /// Opaque provider metadata; survives [`Instance::reset`].
    pub extra: HashMap<String, Value>,

    pub size: Option<Arc<Size>>,

    pub machine: Option<Arc<Machine>>,

    #[serde(skip)]
    node: Option<Node>,
}

impl Instance {
    /// Provider-independent part of normalization: identity, the required
    /// backing image id, and the machine-cache attach. Provider crates
    /// layer their IP/size/machine rules on top of this.
    pub fn from_node(provider: Provider, node: Node, cache: &CloudCache) -> Result<Self> {
        let image_id = node
            .extra_str("imageId")
            .ok_or_else(|| CloudError::MissingNodeField {
                provider,
                id: node.id.clone(),
                field: "imageId",
            })?
            .to_string();
        let machine = cache.machines().get(provider, &image_id);
        Ok(Self {
            id: node.id.clone(),
            alias: node.id.clone(),
            name: node.name.clone(),
            ip: None,
            image_id,
            size_id: None,
            provider,
            extra: node.extra.clone(),
            size: None,
            machine,
            node: Some(node),
        })
    }

    /// String-valued `extra` entry; empty strings count as absent.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        node::extra_str(&self.extra, key)
    }

    /// The raw node this instance was built from, if still attached.
    pub fn node(&self) -> Option<&Node> {
        self.node.as_ref()
    }

    /// Drop the backing node reference. Everything normalized out of it,
    /// `extra` included, stays.
    pub fn reset(&mut self) {
        self.node = None;
    }

    /// Caller-facing REST shape.
    pub fn json(&self) -> Value {
        json!({
            "id": self.id,
            "alias": self.alias,
            "name": self.name,
            "ip": self.ip,
            "provider": self.provider.name(),
            "size": self.size.as_ref().map(|s| s.json()),
            "machine": self.machine.as_ref().map(|m| m.json()),
        })
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance {}", self.json())
    }
}
