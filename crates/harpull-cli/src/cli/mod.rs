//! CLI for the harpull image downloader.

mod menu;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use harpull_core::config::{self, HarpullConfig};
use harpull_core::session::Session;
use std::path::PathBuf;

/// Top-level CLI for harpull.
#[derive(Debug, Parser)]
#[command(name = "harpull")]
#[command(about = "harpull: concurrent image downloader for HAR captures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CliCommand {
    /// Download all images referenced by the given HAR files.
    Fetch {
        /// HAR capture files to process, in order.
        #[arg(required = true)]
        har_files: Vec<PathBuf>,

        /// Destination folder; one subfolder is created per HAR file.
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Parallel downloads per HAR file (default from config).
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Interactive menu (also the default when no command is given).
    Menu,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            Some(CliCommand::Fetch {
                har_files,
                output,
                jobs,
            }) => run_fetch(har_files, output, jobs, &cfg),
            Some(CliCommand::Menu) | None => menu::run_menu(&cfg),
        }
    }
}

fn run_fetch(
    har_files: Vec<PathBuf>,
    output: PathBuf,
    jobs: Option<usize>,
    cfg: &HarpullConfig,
) -> Result<()> {
    let mut session = Session::new();
    session.select_files(har_files);
    session.select_folder(output);
    session.set_concurrency(
        jobs.filter(|n| *n > 0)
            .unwrap_or(cfg.default_concurrency),
    );

    let mut reporter = report::ConsoleReporter::new();
    let summaries = session.start(cfg, &mut reporter)?;
    println!("All downloads completed ({} HAR file(s)).", summaries.len());
    Ok(())
}
