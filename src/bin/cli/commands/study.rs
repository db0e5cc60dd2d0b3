use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use wordwise_lib::practice::SessionOutcome;

use crate::app::App;
use crate::commands::session::resolve_length;
use crate::render::terminal::{paint, render_word, Color};

const PROMPT: &str = "[c]ompleted  [k]nown  [s]kip  [d]efine  [q]uit";

enum Action {
    Outcome(SessionOutcome),
    Define,
    Quit,
    Unknown,
}

fn parse_action(input: &str) -> Action {
    match input.trim().to_lowercase().as_str() {
        "c" | "completed" | "" => Action::Outcome(SessionOutcome::Completed),
        "k" | "known" => Action::Outcome(SessionOutcome::Known),
        "s" | "skip" => Action::Outcome(SessionOutcome::Skipped),
        "d" | "define" => Action::Define,
        "q" | "quit" => Action::Quit,
        _ => Action::Unknown,
    }
}

pub async fn run(app: &mut App, length: Option<usize>, use_color: bool) -> Result<()> {
    let config = app.store.session_config();
    let words = app.store.session_words_with(
        resolve_length(length, config.length),
        config.smart,
        &mut rand::thread_rng(),
    );
    if words.is_empty() {
        println!("Nothing to study with the current filters.");
        return Ok(());
    }

    let enricher = match app.enricher() {
        Ok(enricher) => Some(enricher),
        Err(e) => {
            log::info!("Definitions disabled: {:#}", e);
            None
        }
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut done = 0;

    'words: for (i, word) in words.iter().enumerate() {
        // Warm the cache for the next card while this one is shown
        if let (Some(enricher), Some(next)) = (&enricher, words.get(i + 1)) {
            enricher.prefetch_definition(&next.id);
        }

        println!(
            "\n{} {}/{}",
            paint("Word", Color::CYAN, use_color),
            i + 1,
            words.len()
        );
        println!("{}", render_word(word, app.store.mastery(&word.id), use_color));

        loop {
            print!("{} > ", PROMPT);
            io::stdout().flush().context("Failed to write prompt")?;
            let Some(line) = lines.next() else {
                break 'words;
            };
            let line = line.context("Failed to read input")?;

            match parse_action(&line) {
                Action::Outcome(outcome) => {
                    if let Some(state) = app.store.record_outcome(&word.id, outcome) {
                        println!("  -> {} ({} encounters)", state.status, state.encounters);
                    }
                    done += 1;
                    break;
                }
                Action::Define => match &enricher {
                    Some(enricher) => {
                        let definition = enricher.definition(&word.id).await;
                        println!("  {}", definition.english_definition);
                        println!("  {}", paint(&definition.vietnamese_definition, Color::DIM, use_color));
                        for example in &definition.examples {
                            println!("  - {}", example);
                        }
                    }
                    None => println!("  Definitions need an API key, see config.toml"),
                },
                Action::Quit => break 'words,
                Action::Unknown => println!("  Unrecognized input"),
            }
        }
    }

    // Save whatever the prefetches brought in
    app.store.persist().context("Failed to save progress")?;

    let stats = app.store.completion_stats();
    println!(
        "\nStudied {} of {} words. {} known of {} ({}%).",
        done,
        words.len(),
        stats.completed,
        stats.total,
        stats.percent_complete
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert!(matches!(parse_action(""), Action::Outcome(SessionOutcome::Completed)));
        assert!(matches!(parse_action(" K "), Action::Outcome(SessionOutcome::Known)));
        assert!(matches!(parse_action("skip"), Action::Outcome(SessionOutcome::Skipped)));
        assert!(matches!(parse_action("q"), Action::Quit));
        assert!(matches!(parse_action("x"), Action::Unknown));
    }

    #[test]
    fn test_length_flag_is_clamped() {
        let max = resolve_length(Some(usize::MAX), 20);
        assert!(max < usize::MAX);
        assert_eq!(resolve_length(Some(0), 20), 1);
        assert_eq!(resolve_length(None, 12), 12);
        assert_eq!(resolve_length(Some(500), 20), max);
    }
}
