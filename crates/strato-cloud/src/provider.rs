//! Provider identity and the compute provider trait.

use crate::error::Result;
use crate::instance::Instance;
use crate::machine::Machine;
use crate::node::Node;
use crate::size::Size;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identity of a supported cloud.
///
/// The `name()` token is stable: it keys the process-wide caches and shows
/// up verbatim in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Aws,
    Euca,
    Openstack,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Euca => "euca",
            Provider::Openstack => "openstack",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Aws => "Amazon EC2",
            Provider::Euca => "Eucalyptus",
            Provider::Openstack => "OpenStack",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compute provider abstraction trait
///
/// All providers (AWS, Eucalyptus, OpenStack) implement this trait to turn
/// raw SDK descriptors into the normalized model.
#[async_trait]
pub trait ComputeProvider: Send + Sync {
    /// The provider this implementation normalizes for.
    fn provider(&self) -> Provider;

    /// Provider display name for UI.
    fn display_name(&self) -> &str {
        self.provider().display_name()
    }

    /// Public IP of a node under this provider's addressing rules.
    fn public_ip(&self, node: &Node) -> Option<String>;

    /// Status text for an already-normalized instance. Computed from
    /// `extra`, so it stays available after [`Instance::reset`].
    fn status(&self, instance: &Instance) -> String;

    /// Normalize a single node response into an [`Instance`].
    async fn instance(&self, node: Node) -> Result<Instance>;

    /// Normalize a batch of node responses.
    async fn instances(&self, nodes: Vec<Node>) -> Result<Vec<Instance>> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            out.push(self.instance(node).await?);
        }
        Ok(out)
    }

    /// All sizes offered by this provider, RAM-ascending, served from the
    /// cache after the first fetch.
    async fn sizes(&self) -> Result<Vec<Arc<Size>>>;

    /// All machine images known to this provider, served from the cache
    /// after the first fetch.
    async fn machines(&self) -> Result<Vec<Arc<Machine>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_tokens() {
        assert_eq!(Provider::Aws.name(), "aws");
        assert_eq!(Provider::Euca.name(), "euca");
        assert_eq!(Provider::Openstack.name(), "openstack");
        assert_eq!(Provider::Openstack.to_string(), "openstack");
    }

    #[test]
    fn test_provider_serde_round_trip() {
        let token = serde_json::to_string(&Provider::Openstack).unwrap();
        assert_eq!(token, "\"openstack\"");
        let back: Provider = serde_json::from_str(&token).unwrap();
        assert_eq!(back, Provider::Openstack);
    }
}
