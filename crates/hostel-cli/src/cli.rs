use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hostel-merge",
    about = "Merge duplicate hostels and reconcile room allocations",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON store file; overrides `[store] path`
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List hostels and duplicate groups
    Scan,
    /// Show what a merge would do without writing anything
    Plan,
    /// Merge duplicates, repair allocations, and validate
    Run(RunArgs),
    /// Reconcile allocations against current occupant lists
    Validate,
}

#[derive(Args)]
pub struct RunArgs {
    /// Plan and report only
    #[arg(long)]
    pub dry_run: bool,
    /// Skip the post-merge validation pass
    #[arg(long)]
    pub no_validate: bool,
}
