//! Command-line configuration and scan defaults.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// constants (used as defaults)
/// Default maximum number of concurrent resolution lookups
pub const DEFAULT_CONCURRENCY: usize = 10;
/// Per-lookup timeout in seconds
///
/// Bounds each individual resolution attempt, not the batch as a whole.
pub const LOOKUP_TIMEOUT_SECS: u64 = 2;
/// Interval in seconds between progress log lines while the brute force runs
pub const LOGGING_INTERVAL_SECS: u64 = 5;

/// Built-in wordlist of common subdomain labels.
///
/// Used when no wordlist file is given or the given file cannot be read.
pub const DEFAULT_WORDLIST: &[&str] = &[
    "www", "mail", "ftp", "admin", "api", "blog", "shop", "dev", "test",
];

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Normal operational output (default)
    Info,
    /// Verbose diagnostic output
    Debug,
    /// Everything
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options except the target domain have sensible defaults and can be
/// overridden via command-line flags.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// domain_recon -d example.com
///
/// # With a custom wordlist and higher concurrency
/// domain_recon -d example.com -w wordlist.txt -t 20
///
/// # Save the full result as JSON
/// domain_recon -d example.com -o results.json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "domain_recon",
    about = "DNS reconnaissance: record enumeration, zone-transfer checks, and subdomain brute forcing."
)]
pub struct Config {
    /// Target domain to scan
    #[arg(short = 'd', long)]
    pub domain: String,

    /// Wordlist file with one subdomain label per line.
    ///
    /// Blank lines are ignored. If the file is missing or unreadable, the
    /// built-in list of common labels is used instead.
    #[arg(short = 'w', long)]
    pub wordlist: Option<PathBuf>,

    /// Maximum number of concurrent resolution lookups
    #[arg(short = 't', long = "threads", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-lookup timeout in seconds
    ///
    /// Applies to each resolution attempt individually; one slow name never
    /// stalls the rest of the batch.
    #[arg(long, default_value_t = LOOKUP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Write the full scan result to this file as JSON
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Disable colored report output
    #[arg(long)]
    pub no_color: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            domain: String::new(),
            wordlist: None,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_seconds: LOOKUP_TIMEOUT_SECS,
            output: None,
            no_color: false,
            log_level: LogLevel::Info,
        }
    }
}
