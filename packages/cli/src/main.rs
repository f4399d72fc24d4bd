mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    blocks, init, new_page, render, validate, BlocksArgs, InitArgs, NewArgs, RenderArgs,
    ValidateArgs,
};
use config::Config;
use pagecraft_editor::FilePageStore;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pagecraft CLI - build and render block-based pages
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Storage directory (overrides the config file)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// Create a page from a template
    New(NewArgs),

    /// Render a stored page to HTML
    Render(RenderArgs),

    /// Check a page JSON file
    Validate(ValidateArgs),

    /// List the block types pages can use
    Blocks(BlocksArgs),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so rendered HTML on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Validate(args) => validate(args).map(|_| ()),
        Command::Blocks(args) => blocks(args),
        Command::New(args) => {
            let (_, store) = open_store(&cwd, cli.storage_dir.as_deref())?;
            new_page(args, &store).await
        }
        Command::Render(args) => {
            let (config, store) = open_store(&cwd, cli.storage_dir.as_deref())?;
            render(args, &config, &store).await
        }
    }
}

fn open_store(cwd: &Path, storage_dir: Option<&Path>) -> anyhow::Result<(Config, FilePageStore)> {
    let config = Config::load(cwd)?;
    let root = config.storage_path(cwd, storage_dir);
    debug!(root = %root.display(), "Using page store");
    Ok((config, FilePageStore::new(root)))
}
