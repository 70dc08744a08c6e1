// src/cli.rs
// Usage:
//   yass scrape                      compact JSON on stdout
//   yass scrape -v --pretty -o ast.json
//
// Logs go to stderr; a failed run exits non-zero and writes nothing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::options::{AppOptions, OutputOptions, ScrapeOptions};
use crate::core::net::HttpFetcher;
use crate::{file, log, scrape};

#[derive(Debug, Parser)]
#[command(name = "yass", version, about = "Campus shuttle schedule scraper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape every schedule and print the AST as JSON.
    Scrape(ScrapeArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Log progress (one line per page fetched).
    #[arg(short, long)]
    pub verbose: bool,

    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Indent the JSON.
    #[arg(long)]
    pub pretty: bool,
}

impl From<ScrapeArgs> for AppOptions {
    fn from(args: ScrapeArgs) -> Self {
        AppOptions {
            verbose: args.verbose,
            scrape: ScrapeOptions::default(),
            output: OutputOptions { path: args.output, pretty: args.pretty },
        }
    }
}

/// Parse argv; usage errors exit 1, `--help`/`--version` exit 0.
pub fn parse_args() -> AppOptions {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };
    match cli.command {
        Command::Scrape(args) => args.into(),
    }
}

pub fn run() -> crate::error::Result<()> {
    let options = parse_args();
    log::init(options.verbose);

    let fetcher = HttpFetcher::new()?;
    let ast = scrape::run(&fetcher, &options.scrape)?;

    if let Some(path) = file::write_ast(&ast, &options.output)? {
        info!("wrote {}", path.display());
    }
    Ok(())
}
