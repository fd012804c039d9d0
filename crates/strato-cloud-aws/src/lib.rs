//! Amazon EC2 normalization for strato.
//!
//! Also home of the EC2-family rules (addressing via `dns_name`, the
//! node-reported status, the `instancetype` size attach) that the
//! Eucalyptus crate reuses.

pub mod provider;

pub use provider::{AwsProvider, dns_name_ip, ec2_instance, ec2_status};
