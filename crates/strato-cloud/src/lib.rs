//! Strato Cloud Object Model
//!
//! This crate normalizes cloud-provider compute primitives (instances,
//! sizes/flavors, machine images) into one object model for a multi-cloud
//! orchestration layer. Provider crates implement the normalization rules;
//! a process-wide cache hands out shared `Size` and `Machine` objects for
//! repeated `(provider, id)` lookups.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              orchestration layer                 │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                strato-cloud                      │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait ComputeProvider { ... }            │   │
//! │  │  Instance / Size / Machine                │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐    │
//! │  │  CloudCache  │  │ trait ComputeDriver   │    │
//! │  └──────────────┘  └──────────┬───────────┘    │
//! └───────┬──────────┬────────────│─────────────────┘
//!         │          │            │
//! ┌───────▼───┐ ┌────▼────┐ ┌────▼──────┐
//! │    aws    │ │  euca   │ │ openstack │   provider SDK
//! │  provider │ │ provider│ │  provider │ ──────────────▶
//! └───────────┘ └─────────┘ └───────────┘
//! ```
//!
//! Authentication, pagination and every network concern stay behind the
//! [`ComputeDriver`] seam.

pub mod cache;
pub mod driver;
pub mod error;
pub mod instance;
pub mod machine;
pub mod node;
pub mod provider;
pub mod settings;
pub mod size;

#[cfg(feature = "mock")]
pub mod mock;

// Re-exports
pub use cache::{CloudCache, MachineCache, ResourceCache, SizeCache};
pub use driver::ComputeDriver;
pub use error::{CloudError, Result};
pub use instance::Instance;
pub use machine::Machine;
pub use node::{ImageRecord, Node, SizeRecord};
pub use provider::{ComputeProvider, Provider};
pub use settings::Settings;
pub use size::Size;
