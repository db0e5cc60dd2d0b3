use anyhow::Result;

use wordwise_lib::mastery::MasteryStatus;

use crate::app::App;
use crate::render::terminal::status_label;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    word: &str,
    status: MasteryStatus,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let entry = app.find_word(word)?;
    let Some(state) = app.store.set_status(&entry.id, status) else {
        anyhow::bail!("No progress tracked for '{}'", entry.id);
    };

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "word": entry.id,
                    "state": state,
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("{} is now {}", entry.id, status_label(state.status, use_color).trim_end());
        }
    }
    Ok(())
}
