//! The seam to the provider SDK.
//!
//! Authentication, pagination, rate limiting, retries and every network
//! concern live on the SDK side of this trait; the object model only ever
//! sees the already-fetched records.

use crate::error::Result;
use crate::node::{ImageRecord, SizeRecord};
use async_trait::async_trait;

/// Catalog lookups a provider SDK must answer.
#[async_trait]
pub trait ComputeDriver: Send + Sync {
    /// Every size/flavor the provider offers.
    async fn list_sizes(&self) -> Result<Vec<SizeRecord>>;

    /// Every machine image the provider knows.
    async fn list_images(&self) -> Result<Vec<ImageRecord>>;

    /// A single image by provider id.
    async fn get_image(&self, id: &str) -> Result<ImageRecord>;

    /// A single size/flavor by provider id.
    async fn get_size(&self, id: &str) -> Result<SizeRecord>;
}
