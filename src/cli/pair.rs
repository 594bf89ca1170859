//! Pair command - run the pairing engine on local files.
//!
//! Teams are a JSON array of `{id, wins, losses, rating}`; availability is a
//! JSON object mapping each day to the teams free on it. No service is
//! contacted.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::availability::AvailabilityIndex;
use crate::core::team::Team;
use crate::pairing::{Pair, PairingConfig, PairingEngine, PairingError};
use crate::utils::validation::{check_team_limit, validate_identifier};

/// Arguments for the pair command
#[derive(Args)]
pub struct PairArgs {
    /// JSON file with the standings of every team
    #[arg(long, required = true)]
    pub teams: PathBuf,

    /// JSON file mapping each day to the teams available on it
    #[arg(long, required = true)]
    pub availability: PathBuf,

    /// Tournament id, used with --round to derive the fallback seed
    #[arg(long, requires = "round")]
    pub tournament: Option<String>,

    /// Round number, used with --tournament to derive the fallback seed
    #[arg(long, requires = "tournament", value_parser = clap::value_parser!(u32).range(1..))]
    pub round: Option<u32>,

    /// Explicit fallback seed
    #[arg(long, conflicts_with_all = ["tournament", "round"])]
    pub seed: Option<u64>,
}

impl PairArgs {
    fn config(&self) -> anyhow::Result<PairingConfig> {
        match (&self.tournament, self.round, self.seed) {
            (Some(tournament), Some(round), _) => {
                let tournament = validate_identifier("tournamentId", tournament)?;
                Ok(PairingConfig::for_round(&tournament, round))
            }
            (_, _, Some(seed)) => Ok(PairingConfig {
                fallback_seed: seed,
            }),
            _ => Ok(PairingConfig::default()),
        }
    }
}

/// Execute the pair command
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed, or the round
/// cannot be paired.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: PairArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let teams = read_teams(&args.teams)?;
    check_team_limit(teams.len())?;
    let availability = read_availability(&args.availability)?;
    let config = args.config()?;

    if verbose {
        eprintln!(
            "Loaded {} teams and {} days (fallback seed {})",
            teams.len(),
            availability.days().count(),
            config.fallback_seed
        );
    }

    let engine = PairingEngine::with_config(config);
    match engine.pair_round(&teams, &availability) {
        Ok(pairs) => {
            match format {
                OutputFormat::Text => print_text(&pairs),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pairs)?),
                OutputFormat::Tsv => print_tsv(&pairs),
            }
            Ok(())
        }
        Err(err) => {
            if matches!(format, OutputFormat::Json) {
                println!("{}", serde_json::to_string_pretty(&error_json(&err))?);
            }
            Err(anyhow::Error::new(err).context("Round cannot be paired"))
        }
    }
}

fn read_teams(path: &Path) -> anyhow::Result<Vec<Team>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read teams from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse teams in {}", path.display()))
}

fn read_availability(path: &Path) -> anyhow::Result<AvailabilityIndex> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read availability from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse availability in {}", path.display()))
}

fn error_json(err: &PairingError) -> serde_json::Value {
    let mut json = serde_json::json!({
        "kind": err.kind(),
        "error": err.to_string(),
    });
    if let PairingError::NoAvailabilityOverlap { unpaired } = err {
        json["unpaired"] = serde_json::json!(unpaired);
    }
    json
}

fn print_text(pairs: &[Pair]) {
    println!("Paired {} matches:", pairs.len());
    println!();
    for (i, pair) in pairs.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, pair);
    }
}

fn print_tsv(pairs: &[Pair]) {
    println!("match\tteam_a\tteam_b\tday");
    for (i, pair) in pairs.iter().enumerate() {
        println!("{}\t{}\t{}\t{}", i + 1, pair.team_a, pair.team_b, pair.day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TeamId;

    fn args(tournament: Option<&str>, round: Option<u32>, seed: Option<u64>) -> PairArgs {
        PairArgs {
            teams: PathBuf::from("teams.json"),
            availability: PathBuf::from("days.json"),
            tournament: tournament.map(String::from),
            round,
            seed,
        }
    }

    #[test]
    fn test_seed_from_tournament_round() {
        let config = args(Some("cup"), Some(3), None).config().unwrap();
        assert_eq!(config, PairingConfig::for_round("cup", 3));
    }

    #[test]
    fn test_explicit_seed() {
        let config = args(None, None, Some(42)).config().unwrap();
        assert_eq!(config.fallback_seed, 42);
    }

    #[test]
    fn test_invalid_tournament_rejected() {
        assert!(args(Some("../cup"), Some(1), None).config().is_err());
    }

    #[test]
    fn test_error_json_lists_unpaired() {
        let err = PairingError::NoAvailabilityOverlap {
            unpaired: vec![TeamId::new("A"), TeamId::new("B")],
        };
        let json = error_json(&err);
        assert_eq!(json["kind"], "no_availability_overlap");
        assert_eq!(json["unpaired"], serde_json::json!(["A", "B"]));
    }

    #[test]
    fn test_read_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let teams_path = dir.path().join("teams.json");
        let days_path = dir.path().join("days.json");
        std::fs::write(
            &teams_path,
            r#"[{"id": "A", "wins": 1, "losses": 0, "rating": 1510}, {"id": "B"}]"#,
        )
        .unwrap();
        std::fs::write(&days_path, r#"{"Sat": ["A", "B"]}"#).unwrap();

        let teams = read_teams(&teams_path).unwrap();
        assert_eq!(teams[1], Team::new("B", 0, 0, 1500));
        assert_eq!(read_availability(&days_path).unwrap().days().count(), 1);
    }
}
