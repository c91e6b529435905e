use clap::{Parser, Subcommand, ValueEnum};
use shortlist_client::Url;
use shortlist_core::LinkId;
use shortlist_storage::DEFAULT_STORAGE_KEY;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const SERVICE_HOST_ENV: &str = "SHORTLIST_SERVICE_HOST";
pub const DATA_DIR_ENV: &str = "SHORTLIST_DATA_DIR";
pub const STORAGE_KEY_ENV: &str = "SHORTLIST_STORAGE_KEY";
pub const TIMEOUT_ENV: &str = "SHORTLIST_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "SHORTLIST_LOG_FORMAT";

pub const DEFAULT_DATA_DIR: &str = ".shortlist";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shortlist", about = "Shorten URLs and keep a local list of your short links")]
pub struct CLI {
    /// Base URL of the shortening service, e.g. https://s.example
    #[arg(long, env = SERVICE_HOST_ENV, global = true)]
    pub service_host: Option<String>,

    #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    #[arg(long, env = STORAGE_KEY_ENV, default_value = DEFAULT_STORAGE_KEY, global = true)]
    pub storage_key: String,

    #[arg(long, env = TIMEOUT_ENV, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text,
        global = true
    )]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a URL and save the short link
    Create {
        #[arg(value_parser = parse_long_url)]
        url: String,
    },
    /// Show the saved short links
    List,
    /// Remove a saved short link here and on the service
    Delete {
        #[arg(value_parser = parse_link_id)]
        id: LinkId,
    },
}

/// Accepts anything that parses as a URL, keeping the text as typed.
fn parse_long_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("please enter a URL".to_string());
    }

    Url::parse(trimmed).map_err(|e| format!("'{trimmed}' is not a valid URL: {e}"))?;
    Ok(trimmed.to_string())
}

fn parse_link_id(raw: &str) -> Result<LinkId, String> {
    LinkId::new(raw.trim())
}
