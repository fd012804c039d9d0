//! Mock driver for tests and downstream consumers.
//!
//! Enabled with the `mock` feature.

use crate::driver::ComputeDriver;
use crate::error::{CloudError, Result};
use crate::node::{ImageRecord, SizeRecord};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory [`ComputeDriver`] serving preset records.
///
/// Listing calls are counted so tests can assert the caches' listing memo.
#[derive(Default)]
pub struct MockDriver {
    sizes: Vec<SizeRecord>,
    images: Vec<ImageRecord>,
    size_listings: AtomicUsize,
    image_listings: AtomicUsize,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sizes(mut self, sizes: Vec<SizeRecord>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_images(mut self, images: Vec<ImageRecord>) -> Self {
        self.images = images;
        self
    }

    /// How many times `list_sizes` was answered.
    pub fn size_listings(&self) -> usize {
        self.size_listings.load(Ordering::Relaxed)
    }

    /// How many times `list_images` was answered.
    pub fn image_listings(&self) -> usize {
        self.image_listings.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ComputeDriver for MockDriver {
    async fn list_sizes(&self) -> Result<Vec<SizeRecord>> {
        self.size_listings.fetch_add(1, Ordering::Relaxed);
        Ok(self.sizes.clone())
    }

    async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        self.image_listings.fetch_add(1, Ordering::Relaxed);
        Ok(self.images.clone())
    }

    async fn get_image(&self, id: &str) -> Result<ImageRecord> {
        self.images
            .iter()
            .find(|image| image.id == id)
            .cloned()
            .ok_or_else(|| CloudError::ImageNotFound(id.to_string()))
    }

    async fn get_size(&self, id: &str) -> Result<SizeRecord> {
        self.sizes
            .iter()
            .find(|size| size.id == id)
            .cloned()
            .ok_or_else(|| CloudError::SizeNotFound(id.to_string()))
    }
}
