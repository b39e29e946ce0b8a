//! Primary→fallback table probe
//!
//! Resolves the primary table URI and tries to open it. If that fails, the
//! fallback URI gets exactly one attempt with the same region. The result
//! is a report of every attempt plus a terminal outcome with its exit code.

use serde::Serialize;

use crate::config::ProbeConfig;
use crate::error::{Error, Result};
use crate::options::ConnectionOptions;
use crate::traits::{TableCatalog, TableHandle};
use crate::uri::{TableLocation, resolve};

/// Which of the two configured tables an attempt targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptRole {
    Primary,
    Fallback,
}

/// How a single attempt ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AttemptResult {
    /// URI did not resolve to bucket, root and table
    InvalidUri,
    /// Table opened
    Opened(TableHandle),
    /// Connect or open failed
    Failed(String),
}

/// One resolve-and-open attempt
#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    pub role: AttemptRole,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<TableLocation>,
    pub result: AttemptResult,
}

/// Terminal state of the probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Opened { role: AttemptRole, table: TableHandle },
    InvalidPrimary { uri: String },
    InvalidFallback { uri: String },
    Failed { error: String },
}

impl ProbeOutcome {
    /// Process exit code for this outcome
    pub const fn exit_code(&self) -> i32 {
        match self {
            ProbeOutcome::Opened { .. } => 0,
            ProbeOutcome::InvalidPrimary { .. } => 1,
            ProbeOutcome::InvalidFallback { .. } | ProbeOutcome::Failed { .. } => 2,
        }
    }
}

/// Everything the probe did
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub attempts: Vec<Attempt>,
    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Opened { .. })
    }
}

/// Progress callbacks while the probe runs
pub trait ProbeObserver: Send + Sync {
    /// Called before connecting to a resolved location
    fn on_connect(&self, _role: AttemptRole, _root_uri: &str, _table_name: &str) {}

    /// Called after a connect or open failure
    fn on_failure(&self, _role: AttemptRole, _error: &Error) {}
}

impl ProbeObserver for () {}

/// Connect to a catalog root and open one table in it
pub async fn connect_and_open(
    catalog: &dyn TableCatalog,
    root_uri: &str,
    table_name: &str,
    options: &ConnectionOptions,
) -> Result<TableHandle> {
    let connection = catalog.connect(root_uri, options).await?;
    connection.open_table(table_name).await
}

/// Run the probe: primary table first, fallback table once on failure
pub async fn run_probe(
    catalog: &dyn TableCatalog,
    config: &ProbeConfig,
    observer: &dyn ProbeObserver,
) -> ProbeReport {
    let mut attempts = Vec::with_capacity(2);

    let primary = attempt(
        catalog,
        AttemptRole::Primary,
        &config.uri,
        &config.region,
        observer,
    )
    .await;
    let outcome = match &primary.result {
        AttemptResult::InvalidUri => Some(ProbeOutcome::InvalidPrimary {
            uri: config.uri.clone(),
        }),
        AttemptResult::Opened(table) => Some(ProbeOutcome::Opened {
            role: AttemptRole::Primary,
            table: table.clone(),
        }),
        AttemptResult::Failed(_) => None,
    };
    attempts.push(primary);

    if let Some(outcome) = outcome {
        return ProbeReport { attempts, outcome };
    }

    let fallback = attempt(
        catalog,
        AttemptRole::Fallback,
        &config.fallback_uri,
        &config.region,
        observer,
    )
    .await;
    let outcome = match &fallback.result {
        AttemptResult::InvalidUri => ProbeOutcome::InvalidFallback {
            uri: config.fallback_uri.clone(),
        },
        AttemptResult::Opened(table) => ProbeOutcome::Opened {
            role: AttemptRole::Fallback,
            table: table.clone(),
        },
        AttemptResult::Failed(error) => ProbeOutcome::Failed {
            error: error.clone(),
        },
    };
    attempts.push(fallback);

    ProbeReport { attempts, outcome }
}

async fn attempt(
    catalog: &dyn TableCatalog,
    role: AttemptRole,
    uri: &str,
    region: &str,
    observer: &dyn ProbeObserver,
) -> Attempt {
    let location = resolve(uri);

    // A location without a root cannot be opened, even if bucket and table resolved
    let Some((bucket, root_uri, table_name)) = location.as_ref().and_then(|l| {
        l.root_uri
            .clone()
            .map(|root| (l.bucket.clone(), root, l.table_name.clone()))
    }) else {
        tracing::warn!(?role, uri, "table URI did not resolve");
        return Attempt {
            role,
            uri: uri.to_string(),
            location,
            result: AttemptResult::InvalidUri,
        };
    };

    let options = ConnectionOptions::build(&bucket, region);
    tracing::info!(?role, root = %root_uri, table = %table_name, "opening table");
    observer.on_connect(role, &root_uri, &table_name);

    let result = match connect_and_open(catalog, &root_uri, &table_name, &options).await {
        Ok(table) => {
            tracing::info!(?role, version = table.version, "table opened");
            AttemptResult::Opened(table)
        }
        Err(e) => {
            tracing::warn!(?role, error = %e, "table could not be opened");
            observer.on_failure(role, &e);
            AttemptResult::Failed(e.to_string())
        }
    };

    Attempt {
        role,
        uri: uri.to_string(),
        location,
        result,
    }
}
