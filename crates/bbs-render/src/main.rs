//! # bbs-render
//!
//! Command-line front end for the frame rendering engine.
//!
//! ## Overview
//!
//! - `analyze`: per-line width report for stored ANSI frames
//! - `frame`: render a JSON frame request for a context
//! - `template`: render a configured template with variables
//! - `schema`: print the JSON Schema of frame requests
//!
//! Rendered output goes to stdout; logs go to stderr.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let command = Cli::parse().command;
    let config = cli::load_config(&command)?;

    // Initialize logging
    let level = config
        .as_ref()
        .map_or("info", |c| c.logging.level.as_str());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    tracing::debug!("bbs-render v{} running {:?}", env!("CARGO_PKG_VERSION"), command);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(&command, config.as_ref(), &mut out).map_err(|e| {
        let defect = e
            .downcast_ref::<bbs_render::Error>()
            .is_some_and(bbs_render::Error::is_invariant_violation);
        if defect {
            tracing::error!("Renderer produced misaligned output: {:#}", e);
        } else {
            tracing::error!("{:#}", e);
        }
        e
    })
}
