use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use wordwise_lib::practice::{check_quiz_answer, SessionOutcome};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

pub async fn run_define(app: &mut App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entry = app.find_word(word)?;
    let enricher = app.enricher()?;
    let definition = enricher.definition(&entry.id).await;
    app.store.persist().context("Failed to save definition cache")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&definition)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&entry.id, Color::BOLD, use_color));
            println!("  {}", definition.english_definition);
            println!("  {}", paint(&definition.vietnamese_definition, Color::DIM, use_color));
            for example in &definition.examples {
                println!("  - {}", example);
            }
        }
    }
    Ok(())
}

/// Ask the quiz question; a correct answer counts as an encounter
pub async fn run_quiz(app: &mut App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entry = app.find_word(word)?;
    let enricher = app.enricher()?;
    let quiz = enricher.quiz(&entry.id).await;
    app.store.persist().context("Failed to save quiz cache")?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
        return Ok(());
    }

    println!("{}", paint(&quiz.question, Color::BOLD, use_color));
    for (letter, option) in LETTERS.iter().zip(&quiz.options) {
        println!("  {}: {}", letter, option);
    }
    print!("Answer > ");
    io::stdout().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read answer")?;

    let chosen = line
        .trim()
        .chars()
        .next()
        .and_then(|c| LETTERS.iter().position(|l| *l == c.to_ascii_uppercase()))
        .and_then(|i| quiz.options.get(i));

    match chosen {
        Some(option) if check_quiz_answer(&quiz, option) => {
            println!("{}", paint("Correct!", Color::GREEN, use_color));
            app.store.record_outcome(&entry.id, SessionOutcome::Completed);
        }
        _ => {
            println!(
                "{} The answer is: {}",
                paint("Not quite.", Color::RED, use_color),
                quiz.correct_answer
            );
        }
    }
    Ok(())
}
