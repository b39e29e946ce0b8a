//! Connection options for anonymous TOS access
//!
//! Options are a flat string map in the form the table client expects
//! (`aws_endpoint`, `virtual_hosted_style_request`, ...). They are always
//! derived from bucket and region and never carry credentials.

use std::collections::BTreeMap;

use serde::Serialize;

/// Endpoint URL option key
pub const ENDPOINT_KEY: &str = "aws_endpoint";

/// Virtual-hosted-style addressing option key
pub const VIRTUAL_HOSTED_KEY: &str = "virtual_hosted_style_request";

/// Region option key
pub const REGION_KEY: &str = "aws_region";

/// Keys that would carry credentials; none of them is ever set
pub const CREDENTIAL_KEYS: &[&str] = &[
    "aws_access_key_id",
    "aws_secret_access_key",
    "aws_session_token",
    "access_key_id",
    "secret_access_key",
    "session_token",
];

/// Storage options passed to the table catalog when connecting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConnectionOptions(BTreeMap<String, String>);

impl ConnectionOptions {
    /// Build anonymous, virtual-hosted options for a bucket in a TOS region
    pub fn build(bucket: &str, region: &str) -> Self {
        let mut options = BTreeMap::new();
        options.insert(ENDPOINT_KEY.to_string(), endpoint_for(bucket, region));
        options.insert(VIRTUAL_HOSTED_KEY.to_string(), "true".to_string());
        options.insert(REGION_KEY.to_string(), region.to_string());
        Self(options)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Bucket-scoped endpoint URL
    pub fn endpoint(&self) -> Option<&str> {
        self.get(ENDPOINT_KEY)
    }

    pub fn region(&self) -> Option<&str> {
        self.get(REGION_KEY)
    }

    /// Whether requests address the bucket through the host name
    pub fn virtual_hosted_style(&self) -> bool {
        self.get(VIRTUAL_HOSTED_KEY)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// True when no credential key is present
    pub fn is_anonymous(&self) -> bool {
        CREDENTIAL_KEYS.iter().all(|k| !self.0.contains_key(*k))
    }

    /// Iterate over all options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Bucket-scoped TOS S3 endpoint for a region
pub fn endpoint_for(bucket: &str, region: &str) -> String {
    format!("https://{bucket}.tos-s3-{region}.volces.com")
}
