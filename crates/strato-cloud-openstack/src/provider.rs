//! OpenStack provider implementation

use async_trait::async_trait;
use std::sync::Arc;
use strato_cloud::{
    CloudCache, CloudError, ComputeDriver, ComputeProvider, Instance, Machine, Node, Provider,
    Result, Size,
};

/// OpenStack provider
pub struct OpenstackProvider {
    driver: Arc<dyn ComputeDriver>,
    cache: Arc<CloudCache>,
}

impl OpenstackProvider {
    /// Provider over the given SDK driver, using the process-wide cache.
    pub fn new(driver: Arc<dyn ComputeDriver>) -> Self {
        Self::with_cache(driver, CloudCache::global())
    }

    /// Same, with an isolated cache.
    pub fn with_cache(driver: Arc<dyn ComputeDriver>, cache: Arc<CloudCache>) -> Self {
        Self { driver, cache }
    }

    /// Resolve the backing image through the driver, falling back to a
    /// placeholder machine when the image has been deleted provider-side.
    async fn resolve_machine(&self, instance: &mut Instance) {
        match self.driver.get_image(&instance.image_id).await {
            Ok(image) => {
                instance.machine = Some(
                    self.cache
                        .machines()
                        .get_or_insert(Provider::Openstack, &image),
                );
            }
            Err(err) => {
                tracing::warn!(
                    "instance {} is using an image {} that has been deleted: {}",
                    instance.id,
                    instance.image_id,
                    err
                );
                instance.machine = Some(Arc::new(Machine::placeholder(
                    &instance.image_id,
                    Provider::Openstack,
                )));
            }
        }
    }
}

#[async_trait]
impl ComputeProvider for OpenstackProvider {
    fn provider(&self) -> Provider {
        Provider::Openstack
    }

    fn public_ip(&self, node: &Node) -> Option<String> {
        node.public_ips.first().cloned()
    }

    /// Compose the server status with the in-flight task and, for idle
    /// active servers, the deployment marker left in server metadata.
    // TODO: fold extra["power"] into the composed status once the power
    // state mapping is settled.
    fn status(&self, instance: &Instance) -> String {
        let Some(base) = instance.extra_str("status") else {
            return "Unknown".to_string();
        };
        let mut status = base.to_string();
        let task = instance.extra_str("task");
        if let Some(task) = task {
            status.push_str(&format!(" - {task}"));
        }
        let tmp_status = instance
            .extra
            .get("metadata")
            .and_then(|m| m.get("tmp_status"))
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty());
        if let Some(tmp) = tmp_status {
            if task.is_none() && base == "active" {
                status.push_str(&format!(" - {tmp}"));
            }
        }
        status
    }

    async fn instance(&self, node: Node) -> Result<Instance> {
        let mut instance = Instance::from_node(Provider::Openstack, node, &self.cache)?;
        instance.ip = instance.node().and_then(|n| n.public_ips.first().cloned());

        if instance.machine.is_none() {
            self.resolve_machine(&mut instance).await;
        }

        if instance.size.is_none() {
            let flavor_id = instance
                .extra_str("flavorId")
                .ok_or_else(|| CloudError::MissingNodeField {
                    provider: Provider::Openstack,
                    id: instance.id.clone(),
                    field: "flavorId",
                })?
                .to_string();
            let record = self.driver.get_size(&flavor_id).await?;
            instance.size = Some(
                self.cache
                    .sizes()
                    .get_or_insert(Provider::Openstack, &record),
            );
            instance.size_id = Some(flavor_id);
        }

        Ok(instance)
    }

    async fn sizes(&self) -> Result<Vec<Arc<Size>>> {
        self.cache
            .sizes()
            .list(Provider::Openstack, self.driver.as_ref())
            .await
    }

    async fn machines(&self) -> Result<Vec<Arc<Machine>>> {
        self.cache
            .machines()
            .list(Provider::Openstack, self.driver.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instance_with_extra(extra: serde_json::Value) -> Instance {
        let cache = CloudCache::new();
        let mut extra = extra;
        extra["imageId"] = json!("img-1");
        let node: Node = serde_json::from_value(json!({
            "id": "srv-1",
            "name": "web",
            "extra": extra,
        }))
        .unwrap();
        Instance::from_node(Provider::Openstack, node, &cache).unwrap()
    }

    fn provider() -> OpenstackProvider {
        OpenstackProvider::with_cache(
            Arc::new(strato_cloud::mock::MockDriver::new()),
            Arc::new(CloudCache::new()),
        )
    }

    #[test]
    fn test_status_unknown_without_report() {
        assert_eq!(provider().status(&instance_with_extra(json!({}))), "Unknown");
        assert_eq!(
            provider().status(&instance_with_extra(json!({"status": ""}))),
            "Unknown"
        );
    }

    #[test]
    fn test_status_appends_task() {
        let instance = instance_with_extra(json!({"status": "build", "task": "spawning"}));
        assert_eq!(provider().status(&instance), "build - spawning");
    }

    #[test]
    fn test_status_tmp_status_only_for_idle_active() {
        let idle_active = instance_with_extra(json!({
            "status": "active",
            "metadata": {"tmp_status": "networking"},
        }));
        assert_eq!(provider().status(&idle_active), "active - networking");

        // a running task wins over the metadata marker
        let busy = instance_with_extra(json!({
            "status": "active",
            "task": "resizing",
            "metadata": {"tmp_status": "networking"},
        }));
        assert_eq!(provider().status(&busy), "active - resizing");

        // non-active statuses never pick the marker up
        let stopped = instance_with_extra(json!({
            "status": "shutoff",
            "metadata": {"tmp_status": "networking"},
        }));
        assert_eq!(provider().status(&stopped), "shutoff");
    }

    #[test]
    fn test_status_skips_empty_task() {
        let instance = instance_with_extra(json!({"status": "active", "task": ""}));
        assert_eq!(provider().status(&instance), "active");
    }
}
