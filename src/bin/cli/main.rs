mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use wordwise_lib::mastery::MasteryStatus;

#[derive(Parser)]
#[command(name = "wordwise-cli", about = "Vocabulary practice from the terminal", version)]
struct Cli {
    /// Directory holding saved progress and config.toml
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List words matching the browse filters
    Words {
        /// CEFR level, e.g. B1
        #[arg(long)]
        level: Option<String>,
        /// new, learning, focus, known or skipped
        #[arg(long)]
        status: Option<MasteryStatus>,
        #[arg(long)]
        category: Option<String>,
        /// Matches the word or its meaning, ignoring accents
        #[arg(long)]
        search: Option<String>,
    },

    /// Print the words the next study session would use
    Session {
        /// Number of words (1-50, default from settings)
        #[arg(long)]
        length: Option<usize>,
        /// Least-practiced first instead of the mixed selection
        #[arg(long)]
        traditional: bool,
    },

    /// Study a session interactively
    Study {
        #[arg(long)]
        length: Option<usize>,
    },

    /// Set a word's status by hand
    Mark {
        word: String,
        status: MasteryStatus,
    },

    /// Show, set or clear (with an empty string) a word's note
    Note {
        word: String,
        text: Option<String>,
    },

    /// Add or update a custom word
    Add {
        word: String,
        #[arg(long)]
        meaning: String,
        #[arg(long)]
        explanation: String,
        #[arg(long)]
        example: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },

    /// Remove a custom word
    Remove { word: String },

    /// Show learning progress
    Stats,

    /// Erase all learning progress (words and notes are kept)
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show a generated definition for a word
    Define { word: String },

    /// Answer a generated quiz question for a word
    Quiz { word: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir.as_deref())?;

    match cli.command {
        Command::Words {
            level,
            status,
            category,
            search,
        } => {
            let filter = commands::words::BrowseArgs {
                level,
                status,
                category,
                search,
            };
            commands::words::run(&mut app, filter, &cli.format, use_color)?;
        }
        Command::Session {
            length,
            traditional,
        } => {
            commands::session::run(&app, length, traditional, &cli.format, use_color)?;
        }
        Command::Study { length } => {
            commands::study::run(&mut app, length, use_color).await?;
        }
        Command::Mark { word, status } => {
            commands::mark::run(&mut app, &word, status, &cli.format, use_color)?;
        }
        Command::Note { word, text } => {
            commands::note::run(&mut app, &word, text, &cli.format)?;
        }
        Command::Add {
            word,
            meaning,
            explanation,
            example,
            note,
            level,
            category,
        } => {
            let request = wordwise_lib::vocabulary::CustomWordRequest {
                word,
                meaning,
                explanation,
                example,
                note,
                level,
                category,
            };
            commands::add::run(&mut app, &request, &cli.format, use_color)?;
        }
        Command::Remove { word } => {
            commands::add::run_remove(&mut app, &word, &cli.format)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Reset { yes } => {
            commands::stats::run_reset(&mut app, yes, &cli.format)?;
        }
        Command::Define { word } => {
            commands::enrich::run_define(&mut app, &word, &cli.format, use_color).await?;
        }
        Command::Quiz { word } => {
            commands::enrich::run_quiz(&mut app, &word, &cli.format, use_color).await?;
        }
    }

    Ok(())
}
