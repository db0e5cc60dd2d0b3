use anyhow::Result;

use wordwise_lib::session::SessionConfig;

use crate::app::App;
use crate::render::terminal::status_label;
use crate::OutputFormat;

/// The requested length, or the saved one, kept within session bounds
pub fn resolve_length(requested: Option<usize>, saved: usize) -> usize {
    SessionConfig::clamp_length(requested.unwrap_or(saved))
}

pub fn run(
    app: &App,
    length: Option<usize>,
    traditional: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let saved = app.store.session_config();
    let length = resolve_length(length, saved.length);
    let smart = saved.smart && !traditional;

    let words = app
        .store
        .session_words_with(length, smart, &mut rand::thread_rng());

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = words
                .iter()
                .map(|w| {
                    let state = app.store.mastery(&w.id).cloned().unwrap_or_default();
                    serde_json::json!({
                        "word": w.id,
                        "level": w.level,
                        "meaning": w.meaning,
                        "status": state.status,
                        "encounters": state.encounters,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("No words available to learn with the current filters.");
                return Ok(());
            }
            for (i, w) in words.iter().enumerate() {
                let state = app.store.mastery(&w.id).cloned().unwrap_or_default();
                println!(
                    "{:>2}. {:<20} {} {}",
                    i + 1,
                    w.id,
                    status_label(state.status, use_color),
                    state.encounters
                );
            }
            println!(
                "\n{} of {} requested ({})",
                words.len(),
                length,
                if smart { "smart" } else { "traditional" }
            );
        }
    }

    Ok(())
}
