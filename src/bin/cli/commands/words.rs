use anyhow::Result;

use wordwise_lib::mastery::MasteryStatus;

use crate::app::App;
use crate::render::terminal::{paint, status_label, Color};
use crate::OutputFormat;

pub struct BrowseArgs {
    pub level: Option<String>,
    pub status: Option<MasteryStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// List words. Each flag replaces the saved browse filter for that dimension.
pub fn run(app: &mut App, args: BrowseArgs, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.store.set_browse_level(args.level);
    app.store.set_browse_status(args.status);
    app.store.set_browse_category(args.category);
    app.store.set_search(args.search.unwrap_or_default());

    let store = &app.store;
    let words = store.filtered_words();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = words
                .iter()
                .map(|w| {
                    let state = store.mastery(&w.id).cloned().unwrap_or_default();
                    serde_json::json!({
                        "word": w.id,
                        "level": w.level,
                        "category": w.category,
                        "meaning": w.meaning,
                        "custom": w.is_custom(),
                        "status": state.status,
                        "encounters": state.encounters,
                        "note": state.note,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("No words match the current filters.");
                return Ok(());
            }

            let width = words.iter().map(|w| w.id.chars().count()).max().unwrap_or(4).max(4);
            for w in &words {
                let status = store.mastery(&w.id).map(|s| s.status).unwrap_or_default();
                let level = w.level.as_deref().unwrap_or("--");
                let meaning = w.meaning.as_deref().unwrap_or("");
                println!(
                    "{:<width$}  {:<3} {}  {}",
                    w.id,
                    level,
                    status_label(status, use_color),
                    paint(meaning, Color::DIM, use_color),
                    width = width
                );
            }

            let stats = store.word_stats();
            println!(
                "\n{} words, {} known, {} learning ({}% complete)",
                stats.total, stats.known, stats.learning, stats.percent_complete
            );
        }
    }

    Ok(())
}
