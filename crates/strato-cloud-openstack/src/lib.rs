//! OpenStack normalization for strato.
//!
//! Unlike the EC2 family, OpenStack nodes do not carry enough to finish
//! normalization on their own: the backing image and flavor are resolved
//! through the SDK driver and memoized in the process-wide cache.

pub mod provider;

pub use provider::OpenstackProvider;
