//! S3 catalog implementation
//!
//! Wraps aws-sdk-s3 and implements the TableCatalog traits from lp-core.
//! Requests are always anonymous.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;

use lp_core::config::DEFAULT_REGION;
use lp_core::{
    CatalogConnection, ConnectionOptions, Error, Result, RootLocation, TableCatalog, TableHandle,
};

use crate::layout;

/// Catalog backend that connects to S3-compatible storage
#[derive(Debug, Default, Clone, Copy)]
pub struct S3Catalog;

impl S3Catalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TableCatalog for S3Catalog {
    async fn connect(
        &self,
        root_uri: &str,
        options: &ConnectionOptions,
    ) -> Result<Box<dyn CatalogConnection>> {
        let connection = S3Connection::connect(root_uri, options).await?;
        Ok(Box::new(connection))
    }
}

/// Connection to one catalog root
pub struct S3Connection {
    inner: aws_sdk_s3::Client,
    root: RootLocation,
    root_uri: String,
}

impl S3Connection {
    /// Build an anonymous client for the root and check that it is reachable
    pub async fn connect(root_uri: &str, options: &ConnectionOptions) -> Result<Self> {
        let root = RootLocation::parse(root_uri).map_err(|e| Error::Connection(e.to_string()))?;
        let endpoint = layout::service_endpoint(options, &root.bucket)
            .map_err(|e| Error::Connection(e.to_string()))?;
        let region = options.region().unwrap_or(DEFAULT_REGION).to_string();

        tracing::debug!(
            root = root_uri,
            endpoint = endpoint.as_deref().unwrap_or("default"),
            virtual_hosted = options.virtual_hosted_style(),
            "building anonymous S3 client"
        );

        // No credentials provider: requests go out unsigned
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .no_credentials()
            .region(aws_config::Region::new(region));
        if let Some(endpoint) = &endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(!options.virtual_hosted_style())
            .build();

        let connection = Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            root,
            root_uri: root_uri.trim_end_matches('/').to_string(),
        };
        connection.check_root().await?;

        Ok(connection)
    }

    /// List at most one key below the root
    async fn check_root(&self) -> Result<()> {
        let mut request = self
            .inner
            .list_objects_v2()
            .bucket(&self.root.bucket)
            .max_keys(1);
        if !self.root.prefix.is_empty() {
            request = request.prefix(format!("{}/", self.root.prefix));
        }

        request.send().await.map_err(|e| {
            Error::Connection(format!("{}: {}", self.root_uri, DisplayErrorContext(&e)))
        })?;

        Ok(())
    }
}

#[async_trait]
impl CatalogConnection for S3Connection {
    async fn open_table(&self, name: &str) -> Result<TableHandle> {
        let dir_name = layout::table_dir_name(name);
        let versions_prefix = format!(
            "{}/{}/",
            self.root.key(&dir_name),
            layout::VERSIONS_DIR
        );

        let mut latest: Option<(u64, String, Option<jiff::Timestamp>)> = None;
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .inner
                .list_objects_v2()
                .bucket(&self.root.bucket)
                .prefix(&versions_prefix);
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| list_error(name, DisplayErrorContext(&e).to_string()))?;

            let objects = response.contents();
            let page_latest = layout::latest_manifest(objects.iter().filter_map(|o| o.key()));
            if let Some((version, key)) = page_latest
                && latest.as_ref().is_none_or(|(v, _, _)| version > *v)
            {
                let modified = objects
                    .iter()
                    .find(|o| o.key() == Some(key))
                    .and_then(|o| o.last_modified())
                    .and_then(|m| jiff::Timestamp::from_second(m.secs()).ok());
                latest = Some((version, key.to_string(), modified));
            }

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        let Some((version, manifest, last_modified)) = latest else {
            return Err(Error::TableNotFound(format!(
                "{name} has no manifests under {}",
                self.root_uri
            )));
        };

        tracing::debug!(table = name, version, manifest = %manifest, "found latest manifest");

        Ok(TableHandle {
            name: name.to_string(),
            uri: format!("{}/{dir_name}", self.root_uri),
            version,
            manifest,
            last_modified,
        })
    }
}

/// Map a failed `_versions/` listing to an error
///
/// A missing bucket means the table cannot exist; anything else is treated as
/// the catalog being unreachable.
fn list_error(table: &str, detail: String) -> Error {
    if detail.contains("NoSuchBucket") || detail.contains("NotFound") {
        Error::TableNotFound(format!("{table}: {detail}"))
    } else {
        Error::Connection(detail)
    }
}
