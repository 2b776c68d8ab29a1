use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::formatter::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "tfsec")]
#[command(about = "Static security scanner for Terraform code")]
#[command(long_about = "Scans a directory of Terraform (.tf) files for common security misconfigurations and reports each problem with its location and surrounding source.")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    #[arg(value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,

    /// Disable colored output
    #[arg(long, visible_alias = "no-colour")]
    pub no_color: bool,

    /// Print the version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Check codes to skip, comma-separated (e.g. AWS001,AWS002)
    #[arg(short, long, value_delimiter = ',', value_name = "CODES")]
    pub exclude: Vec<String>,

    /// Path to a config file (.yml, .yaml, .json or .toml)
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Scan subdirectories as well
    #[arg(short, long)]
    pub recursive: bool,

    /// List the registered checks and exit
    #[arg(long)]
    pub list_checks: bool,

    /// Enable verbose logging (repeat for debug and trace)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let level = if self.quiet {
            log::LevelFilter::Off
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        let _ = env_logger::Builder::from_default_env()
            .filter_level(level)
            .try_init();
    }
}
