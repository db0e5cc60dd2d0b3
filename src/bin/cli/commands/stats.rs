use anyhow::{bail, Result};

use wordwise_lib::mastery::MasteryStatus;

use crate::app::App;
use crate::render::terminal::{progress_bar, status_label};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let store = &app.store;
    let completion = store.completion_stats();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "completion": completion,
                    "reviewQueue": store.pending_reviews(),
                    "levels": store.levels(),
                    "categories": store.categories(),
                    "session": store.session_config(),
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("{}", progress_bar(completion.percent_complete, 30));
            println!(
                "{} words: {} known, {} learning, {} not started",
                completion.total, completion.completed, completion.in_progress, completion.not_started
            );

            println!();
            for status in MasteryStatus::ALL {
                let count = store
                    .words()
                    .iter()
                    .filter(|w| store.mastery(&w.id).map(|s| s.status).unwrap_or_default() == status)
                    .count();
                println!("  {} {}", status_label(status, use_color), count);
            }

            println!();
            for level in store.levels() {
                let in_level: Vec<_> = store
                    .words()
                    .iter()
                    .filter(|w| w.level.as_deref() == Some(level.as_str()))
                    .collect();
                if in_level.is_empty() {
                    continue;
                }
                let known = in_level
                    .iter()
                    .filter(|w| store.mastery(&w.id).map(|s| s.status) == Some(MasteryStatus::Known))
                    .count();
                println!("  {:<3} {}/{}", level, known, in_level.len());
            }

            let pending = store.pending_reviews();
            println!("\n{} word(s) waiting for review", pending.len());
        }
    }
    Ok(())
}

pub fn run_reset(app: &mut App, yes: bool, format: &OutputFormat) -> Result<()> {
    if !yes {
        bail!("This erases all learning progress. Re-run with --yes to confirm.");
    }
    app.store.reset_all();

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "reset": true })),
        OutputFormat::Plain => println!("Progress reset for {} words.", app.store.words().len()),
    }
    Ok(())
}
