//! resolve command - Show how a table URI is split
//!
//! Prints the bucket, catalog root, table name and the anonymous connection
//! options the probe would use. Never touches the network.

use clap::Args;
use comfy_table::{Table, presets};
use lp_core::config::DEFAULT_REGION;
use lp_core::{ConnectionOptions, TableLocation, resolve};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show how a table URI splits into bucket, root and table
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Table URI (s3://bucket/path/table or tos://...)
    pub uri: String,

    /// TOS region used to build the endpoint
    #[arg(long, env = "TOS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    uri: String,
    openable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<TableLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ConnectionOptions>,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let location = resolve(args.uri.as_str());
    let options = location
        .as_ref()
        .map(|l| ConnectionOptions::build(&l.bucket, &args.region));
    let openable = location.as_ref().is_some_and(TableLocation::is_openable);
    let exit_code = if openable {
        ExitCode::Success
    } else {
        ExitCode::InvalidUri
    };

    if formatter.is_json() {
        formatter.json(&ResolveOutput {
            uri: args.uri,
            openable,
            location,
            options,
        });
        return exit_code;
    }

    let (Some(location), Some(options)) = (location, options) else {
        formatter.error(&format!("Could not resolve '{}'", args.uri));
        return exit_code;
    };

    formatter.println(&location_table(&location, &options).to_string());
    if !openable {
        formatter.warning(&format!(
            "'{}' has no catalog root; the probe would reject it",
            args.uri
        ));
    }

    exit_code
}

fn location_table(location: &TableLocation, options: &ConnectionOptions) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.add_row(vec!["bucket", location.bucket.as_str()]);
    table.add_row(vec!["root", location.root_uri.as_deref().unwrap_or("-")]);
    table.add_row(vec!["table", location.table_name.as_str()]);
    for (key, value) in options.iter() {
        table.add_row(vec![key, value]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_table_rows() {
        let location = resolve("s3://bucket/a/b/table").unwrap();
        let options = ConnectionOptions::build("bucket", "cn-beijing");
        let rendered = location_table(&location, &options).to_string();

        assert!(rendered.contains("s3://bucket/a/b"));
        assert!(rendered.contains("https://bucket.tos-s3-cn-beijing.volces.com"));
        assert!(rendered.contains("virtual_hosted_style_request"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_location_table_without_root() {
        let location = resolve("tos://onlybucket").unwrap();
        let options = ConnectionOptions::build("onlybucket", "cn-beijing");
        let rendered = location_table(&location, &options).to_string();
        assert!(rendered.contains("onlybucket"));
        assert!(rendered.lines().any(|l| l.contains("root") && l.contains('-')));
    }

    #[test]
    fn test_resolve_exit_codes() {
        let quiet = OutputConfig {
            quiet: true,
            ..Default::default()
        };
        let run = |uri: &str| {
            execute(
                ResolveArgs {
                    uri: uri.to_string(),
                    region: DEFAULT_REGION.to_string(),
                },
                quiet.clone(),
            )
        };

        assert_eq!(run("s3://bucket/db/table"), ExitCode::Success);
        assert_eq!(run("tos://onlybucket"), ExitCode::InvalidUri);
        assert_eq!(run(""), ExitCode::InvalidUri);
    }
}
