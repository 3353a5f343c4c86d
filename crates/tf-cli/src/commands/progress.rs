use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tf_mechanics::calculate_modifier;
use tf_mechanics::progression::{
    MAX_LEVEL, hit_die, level_grants_asi, level_progress, progression_max_hp, threshold_for,
};

pub fn run(xp: u32, class: Option<&str>, con: i32, seed: Option<u64>) -> Result<(), String> {
    let progress = level_progress(xp);

    println!("  {} {xp} XP", "Progress".bold());
    if progress.is_max_level {
        println!("  Level {} {}", progress.level, "(max level)".dimmed());
    } else {
        println!(
            "  Level {}: {}/{} XP into the level ({}%)",
            progress.level, progress.current, progress.required, progress.percentage
        );
        println!(
            "  {} XP to level {}",
            progress.required - progress.current,
            progress.level + 1
        );
    }
    println!();

    let con_mod = calculate_modifier(con);
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Level", "XP", "ASI"];
    if class.is_some() {
        header.push("Max HP");
    }
    table.set_header(header);

    for level in 1..=MAX_LEVEL {
        let marker = if level == progress.level { " <" } else { "" };
        let asi = if level_grants_asi(level) { "yes" } else { "" };
        let mut row = vec![
            format!("{level}{marker}"),
            threshold_for(level).to_string(),
            asi.to_string(),
        ];
        if let Some(class) = class {
            row.push(progression_max_hp(class, level, con_mod).to_string());
        }
        table.add_row(row);
    }

    println!("{table}");
    if let Some(class) = class {
        let die = hit_die(class);
        let rolled = die.roll(&mut super::engine_config(seed).rng());
        println!();
        println!("  {class} uses a {die} hit die (CON modifier {con_mod:+})");
        println!(
            "  Rolled level-up: {die} = {rolled}, {} HP with CON",
            (i64::from(rolled) + i64::from(con_mod)).max(1)
        );
    }

    Ok(())
}
