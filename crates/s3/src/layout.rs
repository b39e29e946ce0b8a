//! Lance table layout on object storage
//!
//! A catalog root holds one directory per table, `{table}.lance`. Each table
//! keeps its version manifests under `_versions/`. Two naming schemes exist:
//! - V1: `{version}.manifest`
//! - V2: `{u64::MAX - version}.manifest`, zero padded to 20 digits, so that
//!   the newest version sorts first

use lp_core::{ConnectionOptions, Result};
use url::Url;

/// Directory suffix of a table inside the catalog root
pub const TABLE_SUFFIX: &str = ".lance";

/// Directory holding version manifests
pub const VERSIONS_DIR: &str = "_versions";

/// Extension of manifest files
pub const MANIFEST_EXTENSION: &str = ".manifest";

/// Digits in a V2 manifest file name
const V2_WIDTH: usize = 20;

/// Directory name of a table, e.g. `imdb_top_1000.lance`
pub fn table_dir_name(name: &str) -> String {
    if name.ends_with(TABLE_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{TABLE_SUFFIX}")
    }
}

/// Parse the table version out of a manifest object key
///
/// Returns `None` for keys that are not manifests.
pub fn parse_manifest_version(key: &str) -> Option<u64> {
    let file_name = key.rsplit('/').next()?;
    let stem = file_name.strip_suffix(MANIFEST_EXTENSION)?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let number: u64 = stem.parse().ok()?;
    if stem.len() == V2_WIDTH {
        Some(u64::MAX - number)
    } else {
        Some(number)
    }
}

/// Newest manifest among object keys, as `(version, key)`
///
/// Non-manifest keys (`.txn` files, stray objects) are skipped.
pub fn latest_manifest<'a>(keys: impl IntoIterator<Item = &'a str>) -> Option<(u64, &'a str)> {
    keys.into_iter()
        .filter_map(|key| parse_manifest_version(key).map(|version| (version, key)))
        .max_by_key(|(version, _)| *version)
}

/// Endpoint URL to hand to the S3 SDK
///
/// The connection options carry a bucket-scoped endpoint for virtual-hosted
/// requests (`https://{bucket}.tos-s3-{region}.volces.com`). The SDK adds the
/// bucket label itself, so it is removed from the host here.
pub fn service_endpoint(options: &ConnectionOptions, bucket: &str) -> Result<Option<String>> {
    let Some(raw) = options.endpoint() else {
        return Ok(None);
    };

    let mut url = Url::parse(raw)?;
    if options.virtual_hosted_style() {
        let bucket_label = format!("{bucket}.");
        let service_host = url
            .host_str()
            .and_then(|host| host.strip_prefix(&bucket_label))
            .map(str::to_string);
        if let Some(host) = service_host {
            url.set_host(Some(&host))?;
        }
    }

    Ok(Some(url.as_str().trim_end_matches('/').to_string()))
}
