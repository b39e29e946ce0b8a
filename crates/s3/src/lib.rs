//! lp-s3: S3 SDK adapter for lance-probe
//!
//! This crate implements the TableCatalog trait from lp-core over
//! S3-compatible storage using the Lance on-disk layout. It is the only
//! crate that directly depends on the AWS SDK.

pub mod client;
pub mod layout;

pub use client::{S3Catalog, S3Connection};
