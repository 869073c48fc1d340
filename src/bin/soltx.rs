use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::{json, Value};
use solana_tx_resolver::{
    identify_platform, normalize, ProgramRegistry, ResolveConfig, TransactionResolver,
};

#[derive(Parser)]
#[command(author, version, about = "Decode and resolve a Solana transaction", long_about = None)]
struct Cli {
    /// RPC or Geyser transaction JSON. Reads stdin when omitted.
    file: Option<PathBuf>,
    /// JSON file with resolver settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output mode
    #[arg(long, value_enum, default_value = "resolve")]
    mode: Mode,
    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Semantic verdict only
    Resolve,
    /// Decoded instructions only
    Parse,
    /// Verdict, decoded instructions and platform
    All,
}

fn read_json(file: Option<&PathBuf>) -> Result<Value> {
    let data = match file {
        Some(path) => fs::read(path).with_context(|| format!("failed to read {:?}", path))?,
        None => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };
    serde_json::from_slice(&data).context("failed to parse transaction JSON")
}

fn load_config(path: Option<&PathBuf>) -> Result<ResolveConfig> {
    let Some(path) = path else {
        return Ok(ResolveConfig::default());
    };
    let data = fs::read(path).with_context(|| format!("failed to read {:?}", path))?;
    serde_json::from_slice(&data).with_context(|| format!("invalid config in {:?}", path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let value = read_json(cli.file.as_ref())?;
    let resolver = TransactionResolver::new(load_config(cli.config.as_ref())?);

    let tx = normalize(&value)?;
    let instructions = ProgramRegistry::global().parse(&tx)?;

    let output = match cli.mode {
        Mode::Resolve => serde_json::to_value(resolver.resolve(&instructions))?,
        Mode::Parse => serde_json::to_value(&instructions)?,
        Mode::All => json!({
            "signature": tx.signatures.first(),
            "slot": tx.slot,
            "platform": identify_platform(&tx),
            "instructions": instructions,
            "resolve": resolver.resolve(&instructions),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
