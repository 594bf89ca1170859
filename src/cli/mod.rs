//! Command-line interface for round-pairing.
//!
//! - **serve**: run the HTTP coordinator in front of the tournament services
//! - **pair**: pair one round offline from JSON files
//!
//! ## Usage
//!
//! ```text
//! # Run the coordinator with a config file
//! round-pairing serve --config round-pairing.toml
//!
//! # Pair a round offline, reproducing the service's fallback shuffle
//! round-pairing pair --teams teams.json --availability days.json \
//!     --tournament spring-cup --round 3
//!
//! # Tab-separated output for spreadsheets
//! round-pairing pair --teams teams.json --availability days.json --format tsv
//! ```

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod pair;

#[derive(Parser)]
#[command(name = "round-pairing")]
#[command(version)]
#[command(about = "Pair tournament rounds by standings and availability")]
#[command(
    long_about = "round-pairing pairs the teams of a tournament round into head-to-head matches.\n\nTeams are ranked by wins and rating, then matched with the closest-ranked team they share an available day with. As a service it fetches standings and availability, creates the matches and announces them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP coordinator
    Serve(ServeArgs),

    /// Pair a round from local JSON files
    Pair(pair::PairArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind to (overrides the configured bind address)
    #[arg(short, long)]
    pub address: Option<IpAddr>,

    /// Port to listen on (overrides the configured bind port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
