use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Deep tissue two-photon imaging optimizer.
///
/// Without a subcommand the dashboard window opens.
#[derive(Parser, Debug)]
#[command(name = "tissuescope", version, about = "Deep tissue imaging optimizer")]
pub struct Cli {
    /// Experience mode: quick-setup, standard or advanced
    #[arg(long, default_value = "standard", value_name = "MODE", global = true)]
    pub mode: String,

    /// Directory holding the fluorophore, laser and absorption data
    #[arg(long, default_value = "data", value_name = "DIR", global = true)]
    pub data_dir: PathBuf,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_name = "LEVEL", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the navigation sections and pages of the selected mode
    Pages,
    /// Run the tissue model with the saved default parameters and print a report
    Analyze {
        /// Print the report as JSON
        #[arg(long, alias = "jq")]
        json: bool,
        /// JSON object of parameter overrides, e.g. '{"depth": 1.5}'
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
    },
    /// Load a fluorophore or laser CSV and report what would be used
    Validate {
        path: PathBuf,
        /// Table type; guessed from the header when omitted
        #[arg(long, value_enum)]
        kind: Option<TableKind>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    Fluorophores,
    Lasers,
}

impl Cli {
    /// Log level as an env_logger filter string.
    pub fn log_filter(&self) -> &str {
        match self.log_level.to_lowercase().as_str() {
            "error" => "error",
            "warn" | "warning" => "warn",
            "info" => "info",
            "debug" => "debug",
            "trace" => "trace",
            "off" => "off",
            _ => "info",
        }
    }
}
