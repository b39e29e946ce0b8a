//! TableCatalog trait definition
//!
//! These traits define how the probe talks to a table catalog on object
//! storage. They keep the probe decoupled from the S3 SDK.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::options::ConnectionOptions;

/// An opened table, identified by its latest manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableHandle {
    /// Table name as requested
    pub name: String,

    /// Full URI of the table directory
    pub uri: String,

    /// Latest version found
    pub version: u64,

    /// Object key of the manifest for `version`
    pub manifest: String,

    /// When the manifest was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,
}

/// Entry point to a catalog backend
///
/// Implemented by the S3 adapter and mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Connect to the catalog rooted at `root_uri`
    async fn connect(
        &self,
        root_uri: &str,
        options: &ConnectionOptions,
    ) -> Result<Box<dyn CatalogConnection>>;
}

/// A live connection scoped to one catalog root
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogConnection: Send + Sync {
    /// Open a table by name
    async fn open_table(&self, name: &str) -> Result<TableHandle>;
}
