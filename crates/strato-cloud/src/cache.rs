//! Process-wide `(provider, id)` caches for sizes and machines.
//!
//! Two lookups for the same pair return the same `Arc` until an explicit
//! [`reset`](ResourceCache::reset); there is no invalidation when the
//! provider changes something on its side. Instances normalized at
//! different times therefore share one `Size`/`Machine` object.

use crate::driver::ComputeDriver;
use crate::error::Result;
use crate::machine::Machine;
use crate::node::{ImageRecord, SizeRecord};
use crate::provider::Provider;
use crate::settings::Settings;
use crate::size::Size;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

const POISONED: &str = "cache lock poisoned";

fn cache_key(provider: Provider, id: &str) -> String {
    format!("{}:{}", provider.name(), id)
}

struct CacheInner<T> {
    /// Objects keyed by `provider:id`.
    by_id: HashMap<String, Arc<T>>,
    /// Memo of the last listing fetched through the driver, per provider.
    listings: HashMap<Provider, Vec<Arc<T>>>,
}

impl<T> Default for CacheInner<T> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            listings: HashMap::new(),
        }
    }
}

/// Keyed cache of shared model objects.
pub struct ResourceCache<T> {
    inner: RwLock<CacheInner<T>>,
    memoize: bool,
}

impl<T> ResourceCache<T> {
    fn new(memoize: bool) -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
            memoize,
        }
    }

    /// Cached object for `(provider, id)`, if any.
    pub fn get(&self, provider: Provider, id: &str) -> Option<Arc<T>> {
        self.inner
            .read()
            .expect(POISONED)
            .by_id
            .get(&cache_key(provider, id))
            .cloned()
    }

    /// Number of cached objects across all providers.
    pub fn len(&self) -> usize {
        self.inner.read().expect(POISONED).by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached object and listing memo.
    pub fn reset(&self) {
        let mut inner = self.inner.write().expect(POISONED);
        inner.by_id.clear();
        inner.listings.clear();
    }

    /// Lookup-or-construct under one lock, so concurrent callers for the
    /// same pair always end up holding the same `Arc`.
    fn get_or_insert_with(
        &self,
        provider: Provider,
        id: &str,
        build: impl FnOnce() -> T,
    ) -> Arc<T> {
        if !self.memoize {
            return Arc::new(build());
        }
        let key = cache_key(provider, id);
        let mut inner = self.inner.write().expect(POISONED);
        if let Some(hit) = inner.by_id.get(&key) {
            return hit.clone();
        }
        let value = Arc::new(build());
        inner.by_id.insert(key, value.clone());
        value
    }

    fn cached_listing(&self, provider: Provider) -> Option<Vec<Arc<T>>> {
        if !self.memoize {
            return None;
        }
        self.inner
            .read()
            .expect(POISONED)
            .listings
            .get(&provider)
            .cloned()
    }

    fn store_listing(&self, provider: Provider, listing: Vec<Arc<T>>) {
        if self.memoize {
            self.inner
                .write()
                .expect(POISONED)
                .listings
                .insert(provider, listing);
        }
    }
}

/// Cache of [`Size`] objects keyed by `(provider, id)`.
pub type SizeCache = ResourceCache<Size>;

impl ResourceCache<Size> {
    /// The shared size for this record, constructing and memoizing on the
    /// first sighting.
    pub fn get_or_insert(&self, provider: Provider, record: &SizeRecord) -> Arc<Size> {
        self.get_or_insert_with(provider, &record.id, || Size::from_record(provider, record))
    }

    /// All sizes for `provider`, RAM-ascending. The listing goes through
    /// `driver` once and is memoized until [`reset`](Self::reset).
    pub async fn list(
        &self,
        provider: Provider,
        driver: &dyn ComputeDriver,
    ) -> Result<Vec<Arc<Size>>> {
        if let Some(cached) = self.cached_listing(provider) {
            return Ok(cached);
        }
        let records = driver.list_sizes().await?;
        tracing::debug!("fetched {} sizes for {}", records.len(), provider);
        let mut sizes: Vec<Arc<Size>> = records
            .iter()
            .map(|record| self.get_or_insert(provider, record))
            .collect();
        sizes.sort_by_key(|size| size.ram);
        self.store_listing(provider, sizes.clone());
        Ok(sizes)
    }
}

/// Cache of [`Machine`] objects keyed by `(provider, id)`.
pub type MachineCache = ResourceCache<Machine>;

impl ResourceCache<Machine> {
    /// The shared machine for this image record, constructing and
    /// memoizing on the first sighting.
    pub fn get_or_insert(&self, provider: Provider, record: &ImageRecord) -> Arc<Machine> {
        self.get_or_insert_with(provider, &record.id, || {
            Machine::from_record(provider, record)
        })
    }

    /// All machines for `provider`. The listing goes through `driver` once
    /// and is memoized until [`reset`](Self::reset).
    pub async fn list(
        &self,
        provider: Provider,
        driver: &dyn ComputeDriver,
    ) -> Result<Vec<Arc<Machine>>> {
        if let Some(cached) = self.cached_listing(provider) {
            return Ok(cached);
        }
        let records = driver.list_images().await?;
        tracing::debug!("fetched {} images for {}", records.len(), provider);
        let machines: Vec<Arc<Machine>> = records
            .iter()
            .map(|record| self.get_or_insert(provider, record))
            .collect();
        self.store_listing(provider, machines.clone());
        Ok(machines)
    }
}

/// One size cache and one machine cache, bundled.
pub struct CloudCache {
    sizes: SizeCache,
    machines: MachineCache,
}

impl CloudCache {
    /// Fresh, isolated caches honoring the given settings.
    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            sizes: ResourceCache::new(settings.memoize),
            machines: ResourceCache::new(settings.memoize),
        }
    }

    /// Fresh, isolated caches with memoization on.
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    /// The process-wide cache shared by every provider constructed without
    /// an explicit cache. Built once, honoring [`Settings::from_env`].
    pub fn global() -> Arc<CloudCache> {
        static GLOBAL: LazyLock<Arc<CloudCache>> =
            LazyLock::new(|| Arc::new(CloudCache::with_settings(&Settings::from_env())));
        GLOBAL.clone()
    }

    pub fn sizes(&self) -> &SizeCache {
        &self.sizes
    }

    pub fn machines(&self) -> &MachineCache {
        &self.machines
    }

    /// Clear both caches.
    pub fn reset(&self) {
        self.sizes.reset();
        self.machines.reset();
    }
}

impl Default for CloudCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn flavor(id: &str, ram: u32) -> SizeRecord {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("flavor-{id}"),
            "ram": ram,
        }))
        .unwrap()
    }

    fn image(id: &str) -> ImageRecord {
        ImageRecord {
            id: id.into(),
            name: format!("image-{id}"),
        }
    }

    /// Driver serving a fixed catalog, counting listing calls.
    struct CountingDriver {
        sizes: Vec<SizeRecord>,
        images: Vec<ImageRecord>,
        size_calls: AtomicUsize,
    }

    impl CountingDriver {
        fn new(sizes: Vec<SizeRecord>, images: Vec<ImageRecord>) -> Self {
            Self {
                sizes,
                images,
                size_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ComputeDriver for CountingDriver {
        async fn list_sizes(&self) -> Result<Vec<SizeRecord>> {
            self.size_calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.sizes.clone())
        }

        async fn list_images(&self) -> Result<Vec<ImageRecord>> {
            Ok(self.images.clone())
        }

        async fn get_image(&self, id: &str) -> Result<ImageRecord> {
            self.images
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or_else(|| crate::error::CloudError::ImageNotFound(id.to_string()))
        }

        async fn get_size(&self, id: &str) -> Result<SizeRecord> {
            self.sizes
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(|| crate::error::CloudError::SizeNotFound(id.to_string()))
        }
    }

    #[test]
    fn test_repeated_lookup_shares_one_object() {
        let cache = CloudCache::new();
        let first = cache.sizes().get_or_insert(Provider::Aws, &flavor("m1", 1024));
        let second = cache.sizes().get_or_insert(Provider::Aws, &flavor("m1", 1024));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.sizes().len(), 1);
    }

    #[test]
    fn test_same_id_different_provider_is_distinct() {
        let cache = CloudCache::new();
        let aws = cache.sizes().get_or_insert(Provider::Aws, &flavor("m1", 1024));
        let euca = cache.sizes().get_or_insert(Provider::Euca, &flavor("m1", 1024));
        assert!(!Arc::ptr_eq(&aws, &euca));
        assert_eq!(cache.sizes().len(), 2);
    }

    #[test]
    fn test_reset_yields_fresh_objects() {
        let cache = CloudCache::new();
        let before = cache
            .machines()
            .get_or_insert(Provider::Openstack, &image("img-1"));
        cache.reset();
        assert!(cache.machines().is_empty());
        let after = cache
            .machines()
            .get_or_insert(Provider::Openstack, &image("img-1"));
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_memoization_waived_when_disabled() {
        let cache = CloudCache::with_settings(&Settings { memoize: false });
        let first = cache.sizes().get_or_insert(Provider::Aws, &flavor("m1", 1024));
        let second = cache.sizes().get_or_insert(Provider::Aws, &flavor("m1", 1024));
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(cache.sizes().is_empty());
    }

    #[tokio::test]
    async fn test_size_listing_sorted_and_memoized() {
        let cache = CloudCache::new();
        let driver = CountingDriver::new(
            vec![flavor("xl", 16384), flavor("s", 512), flavor("m", 2048)],
            vec![],
        );

        let sizes = cache.sizes().list(Provider::Openstack, &driver).await.unwrap();
        let rams: Vec<u32> = sizes.iter().map(|s| s.ram).collect();
        assert_eq!(rams, vec![512, 2048, 16384]);

        let again = cache.sizes().list(Provider::Openstack, &driver).await.unwrap();
        assert_eq!(driver.size_calls.load(Ordering::Relaxed), 1);
        assert!(Arc::ptr_eq(&sizes[0], &again[0]));

        cache.reset();
        cache.sizes().list(Provider::Openstack, &driver).await.unwrap();
        assert_eq!(driver.size_calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_machine_listing_routes_through_by_id_cache() {
        let cache = CloudCache::new();
        let driver = CountingDriver::new(vec![], vec![image("a"), image("b")]);

        let machines = cache.machines().list(Provider::Aws, &driver).await.unwrap();
        assert_eq!(machines.len(), 2);

        let direct = cache.machines().get(Provider::Aws, "a").unwrap();
        assert!(Arc::ptr_eq(&machines[0], &direct));
    }
}
