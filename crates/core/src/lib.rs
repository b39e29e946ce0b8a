//! lp-core: Core library for the lance-probe diagnostic
//!
//! This crate provides the SDK-independent parts of the probe:
//! - Storage URI resolution into bucket / catalog root / table name
//! - Anonymous connection options for regional TOS endpoints
//! - Probe configuration and its TOML config file
//! - TableCatalog traits for the storage adapter
//! - The primary→fallback probe procedure
//!
//! Nothing here depends on the AWS SDK, so the probe logic can be tested
//! against mocked catalogs.

pub mod config;
pub mod error;
pub mod options;
pub mod probe;
pub mod traits;
pub mod uri;

pub use config::{ConfigManager, ProbeConfig, ProbeOverrides};
pub use error::{Error, Result};
pub use options::ConnectionOptions;
pub use probe::{
    Attempt, AttemptResult, AttemptRole, ProbeObserver, ProbeOutcome, ProbeReport,
    connect_and_open, run_probe,
};
pub use traits::{CatalogConnection, TableCatalog, TableHandle};
pub use uri::{RootLocation, Scheme, TableLocation, resolve};
