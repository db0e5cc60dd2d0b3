use anyhow::{Context, Result};

use wordwise_lib::vocabulary::CustomWordRequest;

use crate::app::App;
use crate::render::terminal::render_word;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    request: &CustomWordRequest,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let entry = app
        .store
        .add_custom_word(request)
        .context("Failed to add word")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        OutputFormat::Plain => {
            println!("Saved:\n{}", render_word(&entry, app.store.mastery(&entry.id), use_color));
        }
    }
    Ok(())
}

pub fn run_remove(app: &mut App, word: &str, format: &OutputFormat) -> Result<()> {
    let entry = app.find_word(word)?;
    let removed = app.store.remove_word(&entry.id)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "word": entry.id,
                    "removed": removed,
                }))?
            );
        }
        OutputFormat::Plain => {
            if removed {
                println!("Removed '{}'.", entry.id);
            } else {
                println!("'{}' was not in the catalog.", entry.id);
            }
        }
    }
    Ok(())
}
