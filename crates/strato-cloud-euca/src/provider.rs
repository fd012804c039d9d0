//! Eucalyptus provider implementation

use async_trait::async_trait;
use std::sync::Arc;
use strato_cloud::{
    CloudCache, ComputeDriver, ComputeProvider, Instance, Machine, Node, Provider, Result, Size,
};
use strato_cloud_aws::{dns_name_ip, ec2_instance, ec2_status};

/// Eucalyptus provider (EC2 API family)
pub struct EucaProvider {
    driver: Arc<dyn ComputeDriver>,
    cache: Arc<CloudCache>,
}

impl EucaProvider {
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
impl ComputeProvider for EucaProvider {
    fn provider(&self) -> Provider {
        Provider::Euca
    }

    fn public_ip(&self, node: &Node) -> Option<String> {
        dns_name_ip(node)
    }

    fn status(&self, instance: &Instance) -> String {
        ec2_status(instance)
    }

    async fn instance(&self, node: Node) -> Result<Instance> {
        ec2_instance(Provider::Euca, node, &self.cache)
    }

    async fn sizes(&self) -> Result<Vec<Arc<Size>>> {
        self.cache
            .sizes()
            .list(Provider::Euca, self.driver.as_ref())
            .await
    }

    async fn machines(&self) -> Result<Vec<Arc<Machine>>> {
        self.cache
            .machines()
            .list(Provider::Euca, self.driver.as_ref())
            .await
    }
}
