use console::Term;
use std::io::{self, Write};
use crate::core::{GameMode, Outcome, Snapshot, MAX_LIVES};
use crate::ui::ThemeManager;

pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

const GALLOWS: [&str; 7] = [
    "  +---+\n      |\n      |\n      |\n     ===",
    "  +---+\n  O   |\n      |\n      |\n     ===",
    "  +---+\n  O   |\n  |   |\n      |\n     ===",
    "  +---+\n  O   |\n /|   |\n      |\n     ===",
    "  +---+\n  O   |\n /|\\  |\n      |\n     ===",
    "  +---+\n  O   |\n /|\\  |\n /    |\n     ===",
    "  +---+\n  O   |\n /|\\  |\n / \\  |\n     ===",
];

pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
    text_width: usize,
}

impl Display {
    pub fn new(theme_manager: ThemeManager, text_width: usize) -> io::Result<Self> {
        Ok(Self {
            term: Term::stdout(),
            theme_manager,
            text_width,
        })
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        self.term.clear_screen()
    }

    pub fn show_title(&self, title: &str) -> io::Result<()> {
        let styled_title = self.theme_manager.apply_style(title, "title");
        writeln!(io::stdout(), "{}", styled_title)?;
        self.show_separator()?;
        writeln!(io::stdout())?;
        Ok(())
    }

    /// Draws one full frame of the play screen.
    pub fn render(
        &self,
        snapshot: &Snapshot,
        status: Option<(&str, &str)>,
        show_keyboard: bool,
        show_description: bool,
    ) -> io::Result<()> {
        let mut out = io::stdout();

        self.show_title(&format!("Word Guess Game ({})", snapshot.mode))?;

        let stage = gallows_frame(snapshot.hangman_stage, snapshot.starting_lives);
        writeln!(out, "{}", self.theme_manager.apply_style(GALLOWS[stage], "separator"))?;
        writeln!(out)?;

        let word = spaced_word(snapshot);
        writeln!(out, "   {}", self.theme_manager.apply_style(&word, "word"))?;
        writeln!(out)?;

        if show_description {
            let hint = format!("Hint: {}", snapshot.description);
            for line in wrap(&hint, self.text_width) {
                writeln!(out, "{}", self.theme_manager.apply_style(&line, "description"))?;
            }
            writeln!(out)?;
        }

        let lives = lives_bar(snapshot.remaining_lives, snapshot.starting_lives);
        let lives_style = lives_style(snapshot.remaining_lives, snapshot.starting_lives);
        write!(
            out,
            "Lives: {} {}/{}   ",
            self.theme_manager.apply_style(&lives, lives_style),
            snapshot.remaining_lives,
            snapshot.starting_lives
        )?;
        write!(
            out,
            "{}",
            self.theme_manager.apply_style(&hints_label(snapshot.hints_remaining), "hint")
        )?;
        if let Some(seconds) = snapshot.seconds_until_penalty {
            write!(
                out,
                "   {}",
                self.theme_manager.apply_style(&format!("Next penalty in {}s", seconds), "timer")
            )?;
        }
        writeln!(out)?;

        if !snapshot.misses.is_empty() {
            let misses: String = snapshot.misses.iter().collect();
            writeln!(out, "Misses: {}", self.theme_manager.apply_style(&misses, "key_miss"))?;
        }
        writeln!(out)?;

        if show_keyboard {
            for line in self.keyboard_lines(snapshot) {
                writeln!(out, "{}", line)?;
            }
            writeln!(out)?;
        }

        if let Some((message, style)) = status {
            writeln!(out, "{}", self.theme_manager.apply_style(message, style))?;
        }
        match snapshot.outcome {
            Outcome::Won => {
                self.show_success("Congratulations! You guessed the word correctly!")?;
            }
            Outcome::Lost => {
                self.show_error("Sorry, that's not correct.")?;
                if let Some(word) = &snapshot.revealed_word {
                    writeln!(out, "Correct word was: {}", self.theme_manager.apply_style(word, "word"))?;
                }
            }
            Outcome::InProgress => {}
        }
        writeln!(out)?;

        self.show_message(&key_help(snapshot), "info")?;
        out.flush()
    }

    fn keyboard_lines(&self, snapshot: &Snapshot) -> Vec<String> {
        KEYBOARD_ROWS
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let keys: Vec<String> = row
                    .chars()
                    .map(|c| {
                        let style = if snapshot.misses.contains(&c) {
                            "key_miss"
                        } else if snapshot.guessed_letters.contains(&c) {
                            "key_used"
                        } else {
                            "key_available"
                        };
                        self.theme_manager.apply_style(&c.to_string(), style)
                    })
                    .collect();
                format!("{}{}", " ".repeat(row_index + 2), keys.join(" "))
            })
            .collect()
    }

    pub fn show_message(&self, message: &str, style: &str) -> io::Result<()> {
        let styled_message = self.theme_manager.apply_style(message, style);
        writeln!(io::stdout(), "{}", styled_message)?;
        Ok(())
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("❌ {}", error), "error")
    }

    pub fn show_success(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("✅ {}", message), "success")
    }

    pub fn show_warning(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("⚠️ {}", message), "warning")
    }

    pub fn show_info(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("ℹ️ {}", message), "info")
    }

    pub fn show_separator(&self) -> io::Result<()> {
        let separator = "═".repeat(self.text_width);
        let styled = self.theme_manager.apply_style(&separator, "separator");
        writeln!(io::stdout(), "{}", styled)?;
        Ok(())
    }

    pub fn wait_for_enter(&self) -> io::Result<()> {
        let styled_prompt = self.theme_manager.apply_style("Press Enter to continue...", "info");
        print!("{}", styled_prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(())
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        self.theme_manager.set_theme(theme_name)
    }

    pub fn current_theme(&self) -> &str {
        self.theme_manager.current_theme_name()
    }

    pub fn get_available_themes(&self) -> Vec<String> {
        self.theme_manager.list_themes()
    }
}

/// "HELLO" with H and L guessed renders as "H _ L L _".
pub fn spaced_word(snapshot: &Snapshot) -> String {
    let source = snapshot
        .revealed_word
        .as_deref()
        .unwrap_or(&snapshot.masked_word);

    source
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn lives_bar(remaining: u32, starting: u32) -> String {
    let starting = starting.min(MAX_LIVES);
    let remaining = remaining.min(starting);
    let lost = (starting - remaining) as usize;
    format!("{}{}", "♥".repeat(remaining as usize), "♡".repeat(lost))
}

fn lives_style(remaining: u32, starting: u32) -> &'static str {
    if starting == 0 {
        return "lives_low";
    }
    let ratio = remaining as f32 / starting as f32;

    if ratio > 0.6 {
        "lives_high"
    } else if ratio > 0.3 {
        "lives_medium"
    } else {
        "lives_low"
    }
}

/// Spreads the lives of any mode over the seven gallows drawings.
pub fn gallows_frame(stage: u32, starting_lives: u32) -> usize {
    let last = GALLOWS.len() - 1;
    if starting_lives == 0 {
        return last;
    }
    let stage = stage.min(starting_lives) as usize;
    (stage * last + starting_lives as usize - 1) / starting_lives as usize
}

pub fn hints_label(hints: u32) -> String {
    format!("{} hint{} remaining", hints, if hints == 1 { "" } else { "s" })
}

pub fn key_help(snapshot: &Snapshot) -> String {
    let mut parts = Vec::new();

    if snapshot.outcome == Outcome::InProgress {
        parts.push("A-Z guess");
        if snapshot.can_hint {
            parts.push("? hint");
        }
        if snapshot.can_undo {
            parts.push("Backspace remove letter");
        }
        if snapshot.can_submit {
            parts.push("Enter guess");
        }
    } else if snapshot.can_continue && snapshot.mode == GameMode::Timed {
        parts.push("Enter next word");
    }

    parts.push("! restart");
    parts.push("Esc menu");
    parts.join(" | ")
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if !current_line.is_empty() && current_line.len() + word.len() + 1 > width {
            lines.push(std::mem::take(&mut current_line));
        }
        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}
