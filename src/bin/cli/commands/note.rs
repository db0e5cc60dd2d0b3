use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

/// Without `text`, print the note. With it, replace the note (blank clears it).
pub fn run(app: &mut App, word: &str, text: Option<String>, format: &OutputFormat) -> Result<()> {
    let entry = app.find_word(word)?;

    if let Some(text) = text {
        app.store.set_note(&entry.id, Some(text));
    }
    let note = app.store.note(&entry.id);

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "word": entry.id,
                    "note": note,
                }))?
            );
        }
        OutputFormat::Plain => match note {
            Some(note) => println!("{}: {}", entry.id, note),
            None => println!("{} has no note.", entry.id),
        },
    }
    Ok(())
}
