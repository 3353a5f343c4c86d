pub mod check;
pub mod progress;
pub mod resolve;
pub mod skirmish;

use std::fs;
use std::path::Path;

use colored::{ColoredString, Colorize};
use serde::de::DeserializeOwned;
use tf_encounter::{EncounterTemplate, EngineConfig, NarratorTone, PartyUpdate};
use tf_mechanics::{Character, OutcomeTier};

/// Read and parse a JSON file.
fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {what} '{}': {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid {what} '{}': {e}", path.display()))
}

fn load_encounter(path: &Path) -> Result<EncounterTemplate, String> {
    let template: EncounterTemplate = load_json(path, "encounter")?;
    if let Err(e) = template.validate() {
        tracing::warn!(error = %e, encounter = %template.name, "template has malformed rewards");
    }
    Ok(template)
}

fn load_character(path: &Path) -> Result<Character, String> {
    load_json(path, "character")
}

fn save_character(path: &Path, character: &Character) -> Result<(), String> {
    let json = serde_json::to_string_pretty(character).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write '{}': {e}", path.display()))
}

fn parse_tone(s: &str) -> Result<NarratorTone, String> {
    match s.to_lowercase().as_str() {
        "formal" => Ok(NarratorTone::Formal),
        "casual" => Ok(NarratorTone::Casual),
        "dramatic" => Ok(NarratorTone::Dramatic),
        "humorous" => Ok(NarratorTone::Humorous),
        other => Err(format!(
            "unknown tone '{other}' (expected formal, casual, dramatic, humorous)"
        )),
    }
}

fn engine_config(seed: Option<u64>) -> EngineConfig {
    match seed {
        Some(seed) => EngineConfig::default().with_seed(seed),
        None => EngineConfig::default(),
    }
}

fn tier_label(tier: OutcomeTier) -> ColoredString {
    let label = tier.to_string();
    match tier {
        OutcomeTier::CriticalSuccess => label.green().bold(),
        OutcomeTier::Success => label.green(),
        OutcomeTier::Failure => label.yellow(),
        OutcomeTier::CriticalFailure => label.red().bold(),
    }
}

fn print_update(update: &PartyUpdate) {
    for line in &update.reward_messages {
        println!("  {} {line}", "+".green());
    }
    for line in &update.penalty_messages {
        println!("  {} {line}", "-".red());
    }
}
