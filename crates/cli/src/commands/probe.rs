//! probe command - Open the primary table, falling back once
//!
//! Settings come from flags, then environment variables, then the config
//! file, then built-in defaults.

use std::path::PathBuf;
use std::sync::Mutex;

use clap::Args;
use lp_core::config::ConfigFile;
use lp_core::{
    AttemptRole, ConfigManager, Error, ProbeConfig, ProbeObserver, ProbeOutcome, ProbeOverrides,
    ProbeReport, run_probe,
};
use lp_s3::S3Catalog;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Open the primary table, or the fallback table if that fails
#[derive(Args, Debug, Clone, Default)]
pub struct ProbeArgs {
    /// Primary table URI (s3://bucket/path/table or tos://...)
    #[arg(long, env = "LANCEDB_URI")]
    pub uri: Option<String>,

    /// TOS region used to build the endpoint
    #[arg(long, env = "TOS_REGION")]
    pub region: Option<String>,

    /// Table URI tried when the primary cannot be opened
    #[arg(long, env = "LANCEDB_METADATA_URI")]
    pub fallback_uri: Option<String>,

    /// Path to the config file
    #[arg(long, env = "LPROBE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ProbeArgs {
    fn overrides(&self) -> ProbeOverrides {
        ProbeOverrides {
            uri: self.uri.clone(),
            region: self.region.clone(),
            fallback_uri: self.fallback_uri.clone(),
        }
    }

    /// Layer flags and environment over the config file and defaults
    pub fn load_config(&self) -> lp_core::Result<ProbeConfig> {
        let file = match &self.config {
            Some(path) => ConfigManager::with_path(path.clone()).load()?,
            None => match ConfigManager::new() {
                Ok(manager) => manager.load()?,
                Err(e) => {
                    tracing::debug!(error = %e, "no config directory, using defaults");
                    ConfigFile::default()
                }
            },
        };

        Ok(ProbeConfig::default()
            .with_overrides(&file.probe)
            .with_overrides(&self.overrides()))
    }
}

/// Execute the probe command
pub async fn execute(args: ProbeArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from_i32(e.exit_code()).unwrap_or(ExitCode::ConfigError);
        }
    };
    tracing::debug!(?config, "probe configuration");

    let observer = ConsoleObserver::new(formatter.clone());
    let report = run_probe(&S3Catalog::new(), &config, &observer).await;
    observer.stop_spinner();

    render(&formatter, &report);

    ExitCode::from_i32(report.exit_code()).unwrap_or(ExitCode::ProbeFailed)
}

fn render(formatter: &Formatter, report: &ProbeReport) {
    if formatter.is_json() {
        formatter.json(report);
        return;
    }

    let line = outcome_line(&report.outcome);
    if report.is_success() {
        formatter.success(&line);
    } else {
        formatter.failure(&line);
    }
}

/// Line printed before connecting
pub fn connect_line(role: AttemptRole, root_uri: &str, table_name: &str) -> String {
    match role {
        AttemptRole::Primary => {
            format!("Connecting to LanceDB: root={root_uri}, table={table_name}")
        }
        AttemptRole::Fallback => {
            format!("Trying metadata table: root={root_uri}, table={table_name}")
        }
    }
}

/// Line printed when the primary table fails to open
pub fn primary_failure_line(error: &Error) -> String {
    format!("Open default table failed: {error}")
}

/// Final line for a probe outcome
pub fn outcome_line(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Opened {
            role: AttemptRole::Primary,
            table,
        } => format!(
            "Connection successful. Table: {} (version {})",
            table.name, table.version
        ),
        ProbeOutcome::Opened {
            role: AttemptRole::Fallback,
            table,
        } => format!(
            "Connection successful. Opened metadata table: {} (version {})",
            table.name, table.version
        ),
        ProbeOutcome::InvalidPrimary { uri } => format!("Invalid LANCEDB_URI: {uri}"),
        ProbeOutcome::InvalidFallback { uri } => format!("Invalid LANCEDB_METADATA_URI: {uri}"),
        ProbeOutcome::Failed { error } => format!("Connection failed: {error}"),
    }
}

/// Prints progress lines and drives the spinner while the probe runs
struct ConsoleObserver {
    formatter: Formatter,
    spinner: Mutex<Option<Spinner>>,
}

impl ConsoleObserver {
    fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            spinner: Mutex::new(None),
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(spinner) = slot.take()
        {
            spinner.finish_and_clear();
        }
    }
}

impl ProbeObserver for ConsoleObserver {
    fn on_connect(&self, role: AttemptRole, root_uri: &str, table_name: &str) {
        self.stop_spinner();
        self.formatter
            .println(&connect_line(role, root_uri, table_name));

        let spinner = Spinner::start(self.formatter.config(), &format!("Opening {table_name}..."));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn on_failure(&self, role: AttemptRole, error: &Error) {
        self.stop_spinner();
        // The fallback failure is reported as the final outcome
        if role == AttemptRole::Primary {
            self.formatter.println(&primary_failure_line(error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::TableHandle;
    use tempfile::TempDir;

    fn handle(name: &str, version: u64) -> TableHandle {
        TableHandle {
            name: name.to_string(),
            uri: format!("s3://b/db/{name}.lance"),
            version,
            manifest: format!("db/{name}.lance/_versions/{version}.manifest"),
            last_modified: None,
        }
    }

    #[test]
    fn test_connect_lines() {
        insta::assert_snapshot!(
            connect_line(AttemptRole::Primary, "s3://b/db", "imdb_top_1000"),
            @"Connecting to LanceDB: root=s3://b/db, table=imdb_top_1000"
        );
        insta::assert_snapshot!(
            connect_line(AttemptRole::Fallback, "s3://b/db", "metadata_table"),
            @"Trying metadata table: root=s3://b/db, table=metadata_table"
        );
    }

    #[test]
    fn test_primary_failure_line() {
        let err = Error::TableNotFound("imdb_top_1000".into());
        insta::assert_snapshot!(
            primary_failure_line(&err),
            @"Open default table failed: Table not found: imdb_top_1000"
        );
    }

    #[test]
    fn test_outcome_lines() {
        insta::assert_snapshot!(
            outcome_line(&ProbeOutcome::Opened {
                role: AttemptRole::Primary,
                table: handle("imdb_top_1000", 4),
            }),
            @"Connection successful. Table: imdb_top_1000 (version 4)"
        );
        insta::assert_snapshot!(
            outcome_line(&ProbeOutcome::Opened {
                role: AttemptRole::Fallback,
                table: handle("metadata_table", 1),
            }),
            @"Connection successful. Opened metadata table: metadata_table (version 1)"
        );
        insta::assert_snapshot!(
            outcome_line(&ProbeOutcome::InvalidPrimary { uri: "not-a-uri".into() }),
            @"Invalid LANCEDB_URI: not-a-uri"
        );
        insta::assert_snapshot!(
            outcome_line(&ProbeOutcome::InvalidFallback { uri: "s3://x".into() }),
            @"Invalid LANCEDB_METADATA_URI: s3://x"
        );
        insta::assert_snapshot!(
            outcome_line(&ProbeOutcome::Failed { error: "Cannot reach catalog: timeout".into() }),
            @"Connection failed: Cannot reach catalog: timeout"
        );
    }

    #[test]
    fn test_load_config_layers_file_and_flags() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "schema_version = 1\n[probe]\nuri = \"s3://file/db/t\"\nregion = \"cn-shanghai\"\n",
        )
        .unwrap();

        let args = ProbeArgs {
            uri: Some("s3://flag/db/t".into()),
            config: Some(path),
            ..Default::default()
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.uri, "s3://flag/db/t");
        assert_eq!(config.region, "cn-shanghai");
        assert_eq!(config.fallback_uri, lp_core::config::DEFAULT_FALLBACK_URI);
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let args = ProbeArgs {
            config: Some(temp_dir.path().join("absent.toml")),
            ..Default::default()
        };
        assert_eq!(args.load_config().unwrap(), ProbeConfig::default());
    }
}
