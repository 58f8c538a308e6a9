//! pollwatch - report file changes by polling

use anyhow::{Context, Result};
use clap::Parser;
use cli_lib::{config, output};
use std::io::IsTerminal;
use std::path::PathBuf;
use watcher::{PollWatcher, WatchEvent};

/// Watch files and directories for changes by periodic rescanning
#[derive(Parser)]
#[command(name = "pollwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files or directories to watch
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file (default: ./pollwatch.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time between scans in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Follow symlinks while scanning
    #[arg(long)]
    follow_links: bool,

    /// Skip paths matching a gitignore-style pattern (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Honour .gitignore at the root of each watched directory
    #[arg(long)]
    gitignore: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for events
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let mut watcher_config = config::load(cli.config.as_deref(), &cwd)?;
    config::apply(
        &mut watcher_config,
        config::Overrides {
            interval_ms: cli.interval_ms,
            follow_links: cli.follow_links,
            ignore: cli.ignore,
            gitignore: cli.gitignore,
        },
    )?;

    let colored = std::io::stdout().is_terminal();
    let watcher = PollWatcher::new(watcher_config, move |event: WatchEvent| {
        if colored {
            println!("{}", output::colored_line(&event));
        } else {
            println!("{}", output::plain_line(&event));
        }
    })
    .context("Failed to start watcher")?;

    for path in &cli.paths {
        watcher
            .watch(path)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    // Waits for an in-flight sweep
    tokio::task::spawn_blocking(move || watcher.close())
        .await
        .context("Watcher shutdown task failed")?;

    Ok(())
}
