//! Command-line host for the FSI frame decoder.
//!
//! Reads a capture export (one pre-segmented byte window per line), feeds
//! each window through the decoder and renders the results. Declined
//! windows are skipped by default; `--rejects` surfaces them instead.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use fsiwave_core::{parse_export, RecordStore};
use fsiwave_decode::decode;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Capture export to read; stdin when omitted.
    ///
    /// One window per line, either `start_s,end_s,HEXBYTES` or bare
    /// `HEXBYTES`; blank lines and `#` comments are ignored.
    input: Option<PathBuf>,
    /// Emit accepted frames as JSON lines instead of text
    #[arg(long)]
    json: bool,
    /// Also report windows that failed to decode
    #[arg(long)]
    rejects: bool,
    /// Prefix text output with each window's time span
    #[arg(long)]
    timestamps: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let text = read_input(cli.input.as_deref())?;
    let windows = parse_export(&text).context("parse capture export")?;

    let mut store = RecordStore::new(windows.len().max(1));
    for window in windows {
        let outcome = decode(&window.as_raw());
        store.push(window, outcome);
    }
    store.set_filter(true, cli.rejects);

    if cli.json {
        for record in store.entries() {
            match &record.outcome {
                Ok(frame) => println!("{}", serde_json::to_string(frame)?),
                Err(err) if cli.rejects => warn!("window rejected: {err}"),
                Err(_) => {}
            }
        }
    } else {
        print!("{}", store.to_text(cli.timestamps));
    }

    info!(
        "{} windows: {} accepted, {} rejected",
        store.entries().len(),
        store.accepted(),
        store.rejected()
    );
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read capture export '{}'", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read capture export from stdin")?;
            Ok(text)
        }
    }
}
