mod cli;
mod display;

use crate::cli::{Command, LogFormatArg, CLI};
use clap::Parser;
use jiff::Timestamp;
use shortlist_client::config::parse_base_host;
use shortlist_client::{ClientConfig, HttpLinkService};
use shortlist_core::{ConfigError, LinkError};
use shortlist_manager::LinkManager;
use shortlist_storage::{FileStore, LinkStore};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    let store = LinkStore::open_with_key(FileStore::new(&config.data_dir), &config.storage_key)?;
    info!(
        data_dir = %config.data_dir.display(),
        storage_key = %config.storage_key,
        links = store.len(),
        "opened link store"
    );

    match &config.command {
        Command::List => {
            print!("{}", display::render_links(&store.list(), Timestamp::now()));
        }
        Command::Create { url } => {
            let manager = connect(&config, store)?;
            let record = manager.create(url).await?;
            println!("{}", record.short_url);
        }
        Command::Delete { id } => {
            let manager = connect(&config, store)?;
            let outcome = manager.delete(id).await?;

            match (&outcome.removed, &outcome.remote) {
                (Some(_), Ok(())) => println!("deleted {id}"),
                (None, Ok(())) => println!("{id} was not saved locally; deleted on the service"),
                (_, Err(e)) => {
                    if outcome.removed.is_some() {
                        println!("deleted {id} locally");
                    }
                    eprintln!(
                        "warning: the link service did not confirm deleting {id}: {e}; \
                         it is no longer listed here but may still resolve"
                    );
                }
            }
        }
    }

    Ok(())
}

/// Builds a manager for commands that talk to the shortening service.
fn connect(
    config: &CLI,
    store: LinkStore<FileStore>,
) -> Result<LinkManager<HttpLinkService, FileStore>, LinkError> {
    let base_host = config
        .service_host
        .as_deref()
        .ok_or(ConfigError::MissingBaseHost)?;

    let client_config = ClientConfig::builder()
        .base_host(parse_base_host(base_host)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build();
    info!(
        base_host = %client_config.base_host(),
        timeout_secs = config.timeout_secs,
        "using link service"
    );

    let service = HttpLinkService::new(client_config)?;
    Ok(LinkManager::new(service, store))
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}
