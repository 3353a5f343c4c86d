use std::path::Path;

use colored::Colorize;
use tf_encounter::{
    CombatOutcome, EncounterEngine, StorySettings, TemplateNarrator,
    apply_encounter_outcome_to_party, generate_encounter_summary, round_actions,
};

pub async fn run(
    encounter: &Path,
    character_path: &Path,
    actions: &[String],
    seed: Option<u64>,
    save: bool,
) -> Result<(), String> {
    let template = super::load_encounter(encounter)?;
    let character = super::load_character(character_path)?;
    let settings = StorySettings::new();

    let engine = EncounterEngine::with_config(TemplateNarrator, super::engine_config(seed));
    let mut rng = engine.config().rng();
    let mut state = engine.start_rounds();

    println!("  {} {}", "Skirmish:".bold(), template.name);
    for label in actions {
        if state.is_resolved {
            break;
        }
        let round = state.current_round;
        let (next, resolution) = engine
            .resolve_round(&state, &template, label, &character, &settings, &mut rng)
            .await
            .map_err(|e| {
                let offered: Vec<String> = round_actions(&state, &template)
                    .into_iter()
                    .map(|a| a.label)
                    .collect();
                format!("round {round}: {e}; offered: {}", offered.join(", "))
            })?;
        state = next;

        println!();
        println!(
            "  {} {} -> {}",
            format!("Round {round}").bold(),
            resolution.action,
            super::tier_label(resolution.outcome)
        );
        println!("  {}", resolution.narration);
        println!(
            "  {}",
            format!(
                "morale {}, advantage {:+}",
                state.display_morale(),
                state.player_advantage
            )
            .dimmed()
        );
    }

    let summary = generate_encounter_summary(&state);
    println!();
    match summary.outcome {
        Some(CombatOutcome::Victory) => println!("  {}", "Victory".green().bold()),
        Some(CombatOutcome::Defeat) => println!("  {}", "Defeat".red().bold()),
        Some(outcome) => println!("  {}", outcome.to_string().yellow().bold()),
        None => println!(
            "  {}",
            format!("Unresolved after {} rounds", summary.rounds).dimmed()
        ),
    }

    let update = apply_encounter_outcome_to_party(std::slice::from_ref(&character), &summary, None);
    super::print_update(&update);

    if let Some(hero) = update.party.first().filter(|_| save) {
        super::save_character(character_path, hero)?;
    }

    Ok(())
}
