//! Command line pieces shared by both server binaries.

use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{load_config, ConfigFile};

/// Log targets enabled by default: the library and both server binaries
const LOG_TARGETS: [&str; 3] = ["mcp_registry", "arxiv_server", "websurfer_server"];

/// Default `EnvFilter` directive for `level`
pub fn default_log_filter(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Options common to both servers
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    pub quiet: bool,
}

impl CommonArgs {
    /// Log level selected by `-q` / `-v`
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Install the tracing subscriber. `RUST_LOG` takes precedence.
    pub fn init_tracing(&self) {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG")
                    .unwrap_or_else(|_| default_log_filter(self.log_level())),
            ))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Load the configuration file if one was given
    pub fn load_file(&self) -> Result<ConfigFile, ::config::ConfigError> {
        match &self.config {
            Some(path) => {
                tracing::info!("Using config file: {}", path.display());
                load_config(path)
            }
            None => Ok(ConfigFile::default()),
        }
    }

    /// Bind host: flag, then config file, then localhost
    pub fn resolve_host(&self, file: &ConfigFile) -> Option<String> {
        self.host.clone().or_else(|| file.server.host.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_default_filter_covers_binaries() {
        let filter = default_log_filter("info");
        assert_eq!(
            filter,
            "mcp_registry=info,arxiv_server=info,websurfer_server=info"
        );
        assert!(tracing_subscriber::EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_log_level_flags() {
        let level = |args: &[&str]| TestCli::parse_from(args).common.log_level();
        assert_eq!(level(&["test"]), "info");
        assert_eq!(level(&["test", "-v"]), "debug");
        assert_eq!(level(&["test", "-vv"]), "trace");
        assert_eq!(level(&["test", "-q"]), "error");
    }

    #[test]
    fn test_host_flag_wins_over_file() {
        let mut file = ConfigFile::default();
        file.server.host = Some("0.0.0.0".to_string());

        let cli = TestCli::parse_from(["test", "--host", "localhost"]);
        assert_eq!(cli.common.resolve_host(&file).as_deref(), Some("localhost"));

        let cli = TestCli::parse_from(["test"]);
        assert_eq!(cli.common.resolve_host(&file).as_deref(), Some("0.0.0.0"));
    }
}
