use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// nemfile NEM12/NEM13 meter data file writer.
#[derive(Parser)]
#[command(
    name = "nemfile",
    version,
    about = "Write meter readings to AEMO NEM12/NEM13 data files"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert a tabular CSV of interval readings into a NEM12 file.
    Interval(IntervalArgs),
    /// Convert a tabular CSV of register reads into a NEM13 file.
    Accumulated(AccumulatedArgs),
}

/// Arguments for the `interval` subcommand.
#[derive(clap::Args)]
pub struct IntervalArgs {
    /// Input CSV: first column interval-end timestamps, one column per
    /// channel, optional Quality/EventDesc columns.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path; derived from the file content when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Metering point identifier (overrides config).
    #[arg(long)]
    pub nmi: Option<String>,

    /// Receiving participant code (overrides config).
    #[arg(long)]
    pub to_participant: Option<String>,

    /// Sending participant code (overrides config).
    #[arg(long)]
    pub from_participant: Option<String>,

    /// Meter serial number (overrides config).
    #[arg(long)]
    pub serial_number: Option<String>,

    /// Wrap the CSV in a deflate-compressed zip archive.
    #[arg(long)]
    pub zip: bool,
}

/// Arguments for the `accumulated` subcommand.
#[derive(clap::Args)]
pub struct AccumulatedArgs {
    /// Input CSV with one register-read pair per row.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path; derived from the file content when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Receiving participant code (overrides config).
    #[arg(long)]
    pub to_participant: Option<String>,

    /// Sending participant code (overrides config).
    #[arg(long)]
    pub from_participant: Option<String>,

    /// Wrap the CSV in a deflate-compressed zip archive.
    #[arg(long)]
    pub zip: bool,
}
