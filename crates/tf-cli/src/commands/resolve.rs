use std::path::Path;

use colored::Colorize;
use tf_encounter::{
    EncounterEngine, StorySettings, TemplateNarrator, apply_encounter_outcome_to_party,
};

pub struct Options<'a> {
    pub seed: Option<u64>,
    pub tone: &'a str,
    pub save: bool,
    pub json: bool,
}

pub async fn run(
    encounter: &Path,
    character_path: &Path,
    action: &str,
    opts: Options<'_>,
) -> Result<(), String> {
    let template = super::load_encounter(encounter)?;
    let character = super::load_character(character_path)?;
    let settings = StorySettings::new().with_tone(super::parse_tone(opts.tone)?);

    let engine = EncounterEngine::with_config(TemplateNarrator, super::engine_config(opts.seed));
    let mut rng = engine.config().rng();
    let resolution = engine
        .resolve(&template, action, &character, &settings, &mut rng)
        .await
        .map_err(|e| e.to_string())?;

    let update =
        apply_encounter_outcome_to_party(std::slice::from_ref(&character), &resolution, None);

    if opts.json {
        let json = serde_json::to_string_pretty(&resolution).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        println!("  {} {}", template.name.bold(), format!("({})", template.difficulty).dimmed());
        println!("  {} chooses '{}'", character.name, resolution.action);
        if let Some(roll) = &resolution.roll {
            println!("  {roll} vs DC {}", template.difficulty.dc());
        }
        println!("  {}", super::tier_label(resolution.outcome));
        println!();
        println!("  {}", resolution.narration);
        if let Some(damage) = &resolution.damage_description {
            println!("  {}", damage.dimmed());
        }
        if let Some(factions) = &resolution.affected_factions {
            for (faction, delta) in factions {
                println!("  {} {delta:+}", faction.cyan());
            }
        }
        println!();
        super::print_update(&update);
    }

    if let Some(hero) = update.party.first().filter(|_| opts.save) {
        super::save_character(character_path, hero)?;
        if !opts.json {
            println!("  {}", format!("saved {}", character_path.display()).dimmed());
        }
    }

    Ok(())
}
