//! Storage URI resolution
//!
//! Splits a table URI in the format `s3://bucket/path/.../table` (or `tos://`)
//! into the bucket, the catalog root that holds the table, and the table name.

use serde::Serialize;

use crate::error::{Error, Result};

/// URI scheme recognised by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// `s3://`
    S3,
    /// `tos://`
    Tos,
    /// No recognised scheme; the input is used as a bare path
    Bare,
}

impl Scheme {
    /// Prefix that is stripped from, and re-attached to, URIs of this scheme
    pub const fn prefix(self) -> &'static str {
        match self {
            Scheme::S3 => "s3://",
            Scheme::Tos => "tos://",
            Scheme::Bare => "",
        }
    }

    /// Split a URI into its scheme and the remainder after the prefix
    fn split(uri: &str) -> (Self, &str) {
        if let Some(rest) = uri.strip_prefix(Scheme::S3.prefix()) {
            (Scheme::S3, rest)
        } else if let Some(rest) = uri.strip_prefix(Scheme::Tos.prefix()) {
            (Scheme::Tos, rest)
        } else {
            (Scheme::Bare, uri)
        }
    }
}

/// A table URI split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLocation {
    /// Scheme the URI was written with
    pub scheme: Scheme,
    /// First path segment
    pub bucket: String,
    /// Catalog root: scheme plus every segment but the last
    pub root_uri: Option<String>,
    /// Last path segment
    pub table_name: String,
}

impl TableLocation {
    /// Whether the location has everything needed to open the table
    pub fn is_openable(&self) -> bool {
        self.root_uri.is_some()
    }
}

/// Resolve a table URI into bucket, catalog root and table name
///
/// Returns `None` for empty or absent input and for URIs with no path
/// segments. A single-segment URI such as `tos://onlybucket` resolves with
/// the same value for bucket and table name and no root.
pub fn resolve<'a>(uri: impl Into<Option<&'a str>>) -> Option<TableLocation> {
    let uri = uri.into()?;
    if uri.is_empty() {
        return None;
    }

    let (scheme, rest) = Scheme::split(uri);
    let parts: Vec<&str> = rest.split('/').filter(|p| !p.is_empty()).collect();
    let (bucket, table_name) = (parts.first()?, parts.last()?);

    let root = parts[..parts.len() - 1].join("/");
    let root_uri = (!root.is_empty()).then(|| format!("{}{root}", scheme.prefix()));

    Some(TableLocation {
        scheme,
        bucket: bucket.to_string(),
        root_uri,
        table_name: table_name.to_string(),
    })
}

/// A catalog root split into bucket and key prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLocation {
    pub scheme: Scheme,
    pub bucket: String,
    /// Key prefix inside the bucket, without leading or trailing slash
    pub prefix: String,
}

impl RootLocation {
    /// Parse a catalog root URI such as `s3://bucket/lance_catalog/default`
    pub fn parse(root_uri: &str) -> Result<Self> {
        let (scheme, rest) = Scheme::split(root_uri);
        if scheme == Scheme::Bare {
            return Err(Error::InvalidUri(format!(
                "'{root_uri}' has no s3:// or tos:// scheme"
            )));
        }

        let mut parts = rest.split('/').filter(|p| !p.is_empty());
        let bucket = parts
            .next()
            .ok_or_else(|| Error::InvalidUri(format!("'{root_uri}' has no bucket")))?;
        let prefix = parts.collect::<Vec<_>>().join("/");

        Ok(Self {
            scheme,
            bucket: bucket.to_string(),
            prefix,
        })
    }

    /// Join a key below the prefix
    pub fn key(&self, child: &str) -> String {
        if self.prefix.is_empty() {
            child.to_string()
        } else {
            format!("{}/{child}", self.prefix)
        }
    }
}
