use colored::Colorize;
use tf_mechanics::{Difficulty, OutcomeTier, RollMode, roll_check};

pub fn run(
    modifier: i32,
    advantage: bool,
    disadvantage: bool,
    difficulty: Option<&str>,
    seed: Option<u64>,
) -> Result<(), String> {
    let difficulty = difficulty
        .map(|d| {
            Difficulty::from_name(d).ok_or_else(|| {
                format!("unknown difficulty '{d}' (expected trivial, easy, medium, hard, deadly)")
            })
        })
        .transpose()?;

    let mut rng = super::engine_config(seed).rng();
    let roll = roll_check(&mut rng, modifier, advantage, disadvantage);

    println!("  {} {roll}", "Check".bold());
    let mode = roll.mode();
    if let (true, Some(ignored)) = (mode != RollMode::Normal, roll.ignored_roll) {
        println!("  {}", format!("{mode:?}, ignored {ignored}").dimmed());
    }
    if roll.is_critical_success {
        println!("  {}", "Natural 20!".green().bold());
    } else if roll.is_critical_failure {
        println!("  {}", "Natural 1!".red().bold());
    }

    if let Some(difficulty) = difficulty {
        let dc = difficulty.dc();
        let tier = OutcomeTier::classify(&roll, dc);
        println!("  DC {dc} ({}): {}", difficulty.as_str(), super::tier_label(tier));
    }

    Ok(())
}
