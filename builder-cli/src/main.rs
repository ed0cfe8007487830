//! # Coconut Builder CLI
//!
//! Export, inspect and scaffold saved builder pages.

use std::io::Write;

use anyhow::Context;
use builder_cli::{commands, CliArgs, CliConfig, Command};
use builder_core::FilePageStore;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing on stderr so stdout stays free for command output.
///
/// Set `RUST_LOG` to control log levels (default: `builder_cli=info,builder_core=warn`).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("builder_cli=info,builder_core=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = CliConfig::from(CliArgs::parse());
    tracing::debug!("Data directory: {}", config.data_dir.display());

    match config.command {
        Command::Export {
            input,
            output,
            title,
        } => {
            let html = commands::export(&input, title.as_deref())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => std::io::stdout().write_all(html.as_bytes())?,
            }
        }
        Command::Inspect { input } => {
            print!("{}", commands::inspect(&input)?);
        }
        Command::New {
            page_id,
            with,
            title,
        } => {
            let store = FilePageStore::new(&config.data_dir).with_context(|| {
                format!("Failed to open data directory {}", config.data_dir.display())
            })?;
            commands::scaffold(&store, &page_id, &title, &with)?;
            println!("{}", store.page_path(&page_id).display());
        }
    }

    Ok(())
}
