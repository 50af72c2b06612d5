use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::PantryConfig;
use pantry_kv_store::{ChunkedStore, FileStore};
use pantry_inventory::InventoryRepository;
use serde::Serialize;
use std::path::PathBuf;

mod config;
mod inventory;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Ingredient recognition and inventory storage", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to pantry.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Secure store directory (overrides store_dir from the config file)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize ingredients in a saved image-analysis response
    Recognize(RecognizeArgs),

    /// Manage the stored ingredient inventory
    Inventory(InventoryArgs),
}

#[derive(Args)]
struct RecognizeArgs {
    /// JSON file holding the raw `images:annotate` response
    response: PathBuf,
}

#[derive(Args)]
pub(crate) struct InventoryArgs {
    #[command(subcommand)]
    command: inventory::InventoryCommand,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = PantryConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.store_dir {
        config.store_dir = dir;
    }

    match cli.command {
        Commands::Recognize(args) => run_recognize(args).await?,
        Commands::Inventory(args) => {
            let repo = open_repository(&config)?;
            inventory::run(&repo, args.command).await?;
        }
    }

    Ok(())
}

async fn run_recognize(args: RecognizeArgs) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.response)
        .await
        .with_context(|| format!("Cannot read {}", args.response.display()))?;
    let result = pantry_recognition::recognize_json(&raw)
        .with_context(|| format!("Cannot recognize {}", args.response.display()))?;
    if result.is_empty() {
        log::warn!("No ingredients recognized; try another photo");
    }
    print_json(&result)
}

fn open_repository(config: &PantryConfig) -> Result<InventoryRepository<FileStore>> {
    log::debug!("Opening store at {}", config.store_dir.display());
    let backend =
        FileStore::new(&config.store_dir).with_value_limit(config.chunking.single_value_limit);
    let store = ChunkedStore::with_config(backend, config.chunking.clone())?;
    Ok(InventoryRepository::new(store))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
