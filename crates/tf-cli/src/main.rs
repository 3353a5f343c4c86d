//! CLI frontend for the Taleforge encounter engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tf",
    about = "Taleforge: resolve d20 encounters and track character progression",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one action against an encounter
    Resolve {
        /// Encounter template (JSON)
        #[arg(short, long)]
        encounter: PathBuf,

        /// Acting character (JSON)
        #[arg(short, long)]
        character: PathBuf,

        /// Label of the chosen action
        #[arg(short, long)]
        action: String,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Narrator tone: formal, casual, dramatic, humorous
        #[arg(long, default_value = "formal")]
        tone: String,

        /// Write the updated character back to its file
        #[arg(long)]
        save: bool,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a multi-round encounter with a scripted list of actions
    Skirmish {
        /// Encounter template (JSON)
        #[arg(short, long)]
        encounter: PathBuf,

        /// Acting character (JSON)
        #[arg(short, long)]
        character: PathBuf,

        /// Action labels, one per round, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        actions: Vec<String>,

        /// RNG seed for reproducible rounds
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the updated character back to its file
        #[arg(long)]
        save: bool,
    },

    /// Show level, progress, and milestones for an XP total
    Progress {
        /// Experience points
        xp: u32,

        /// Class, for hit-die based max HP per level
        #[arg(long)]
        class: Option<String>,

        /// Constitution score used with --class
        #[arg(long, default_value = "10")]
        con: i32,

        /// RNG seed for the sample level-up roll
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Roll a single d20 ability check
    Check {
        /// Modifier added to the die
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        modifier: i32,

        /// Roll with advantage
        #[arg(long)]
        advantage: bool,

        /// Roll with disadvantage
        #[arg(long)]
        disadvantage: bool,

        /// Difficulty to classify against: trivial, easy, medium, hard, deadly
        #[arg(short, long)]
        difficulty: Option<String>,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Resolve {
            encounter,
            character,
            action,
            seed,
            tone,
            save,
            json,
        } => {
            let opts = commands::resolve::Options {
                seed,
                tone: &tone,
                save,
                json,
            };
            commands::resolve::run(&encounter, &character, &action, opts).await
        }
        Commands::Skirmish {
            encounter,
            character,
            actions,
            seed,
            save,
        } => commands::skirmish::run(&encounter, &character, &actions, seed, save).await,
        Commands::Progress {
            xp,
            class,
            con,
            seed,
        } => commands::progress::run(xp, class.as_deref(), con, seed),
        Commands::Check {
            modifier,
            advantage,
            disadvantage,
            difficulty,
            seed,
        } => commands::check::run(modifier, advantage, disadvantage, difficulty.as_deref(), seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
