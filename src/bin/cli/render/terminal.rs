use wordwise_lib::mastery::{MasteryState, MasteryStatus};
use wordwise_lib::vocabulary::WordEntry;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn status_color(status: MasteryStatus) -> &'static str {
    match status {
        MasteryStatus::New => Color::BLUE,
        MasteryStatus::Learning => Color::YELLOW,
        MasteryStatus::Focus => Color::MAGENTA,
        MasteryStatus::Known => Color::GREEN,
        MasteryStatus::Skipped => Color::GRAY,
    }
}

/// Status label padded to a fixed width before coloring, so columns line up
pub fn status_label(status: MasteryStatus, use_color: bool) -> String {
    paint(&format!("{:<8}", status.as_str()), status_color(status), use_color)
}

/// `[#####.....] 50%`
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        percent
    )
}

/// Multi-line card for one word
pub fn render_word(word: &WordEntry, state: Option<&MasteryState>, use_color: bool) -> String {
    let mut lines = Vec::new();

    let mut header = paint(&word.id, Color::BOLD, use_color);
    if let Some(phonetics) = &word.phonetics {
        header.push_str(&format!(" {}", paint(phonetics, Color::DIM, use_color)));
    }
    if let Some(pos) = &word.part_of_speech {
        header.push_str(&format!(" ({})", pos));
    }
    if let Some(level) = &word.level {
        header.push_str(&format!(" [{}]", level));
    }
    if word.is_custom() {
        header.push_str(&paint(" custom", Color::CYAN, use_color));
    }
    lines.push(header);

    if let Some(meaning) = &word.meaning {
        lines.push(format!("  {}", meaning));
    }
    if let Some(explanation) = &word.explanation {
        lines.push(format!("  {}", paint(explanation, Color::DIM, use_color)));
    }
    for example in &word.examples {
        lines.push(format!("  - {}", example));
    }
    if let Some(state) = state {
        lines.push(format!(
            "  {} {} encounter(s)",
            status_label(state.status, use_color),
            state.encounters
        ));
        if let Some(note) = &state.note {
            lines.push(format!("  note: {}", note));
        }
    }

    lines.join("\n")
}
