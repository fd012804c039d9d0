//! Amazon EC2 provider implementation

use async_trait::async_trait;
use std::sync::Arc;
use strato_cloud::{
    CloudCache, CloudError, ComputeDriver, ComputeProvider, Instance, Machine, Node, Provider,
    Result, Size,
};

/// EC2-family addressing: the node's reported `dns_name`, when present.
pub fn dns_name_ip(node: &Node) -> Option<String> {
    node.extra_str("dns_name").map(str::to_string)
}

/// EC2-family status: the node-reported `status`, `"Unknown"` otherwise.
pub fn ec2_status(instance: &Instance) -> String {
    instance.extra_str("status").unwrap_or("Unknown").to_string()
}

/// EC2-family normalization shared by AWS and Eucalyptus: base fields,
/// `dns_name` addressing, and the reported instance type with the cached
/// size wired in when one exists.
pub fn ec2_instance(provider: Provider, node: Node, cache: &CloudCache) -> Result<Instance> {
    let mut instance = Instance::from_node(provider, node, cache)?;
    instance.ip = instance.extra_str("dns_name").map(str::to_string);
    let size_id = instance
        .extra_str("instancetype")
        .ok_or_else(|| CloudError::MissingNodeField {
            provider,
            id: instance.id.clone(),
            field: "instancetype",
        })?
        .to_string();
    instance.size = cache.sizes().get(provider, &size_id);
    if instance.size.is_none() {
        tracing::debug!("size {} not cached yet for {}", size_id, provider);
    }
    instance.size_id = Some(size_id);
    Ok(instance)
}

/// Amazon EC2 provider
pub struct AwsProvider {
    driver: Arc<dyn ComputeDriver>,
    cache: Arc<CloudCache>,
}

impl AwsProvider {
    /// Provider over the given SDK driver, using the process-wide cache.
    pub fn new(driver: Arc<dyn ComputeDriver>) -> Self {
        Self::with_cache(driver, CloudCache::global())
    }

    /// Same, with an isolated cache.
    pub fn with_cache(driver: Arc<dyn ComputeDriver>, cache: Arc<CloudCache>) -> Self {
        Self { driver, cache }
    }
}

#[async_trait]
impl ComputeProvider for AwsProvider {
    fn provider(&self) -> Provider {
        Provider::Aws
    }

    fn public_ip(&self, node: &Node) -> Option<String> {
        dns_name_ip(node)
    }

    fn status(&self, instance: &Instance) -> String {
        ec2_status(instance)
    }

    async fn instance(&self, node: Node) -> Result<Instance> {
        ec2_instance(Provider::Aws, node, &self.cache)
    }

    async fn sizes(&self) -> Result<Vec<Arc<Size>>> {
        self.cache
            .sizes()
            .list(Provider::Aws, self.driver.as_ref())
            .await
    }

    async fn machines(&self) -> Result<Vec<Arc<Machine>>> {
        self.cache
            .machines()
            .list(Provider::Aws, self.driver.as_ref())
            .await
    }
}
