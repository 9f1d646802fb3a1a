use crate::cli::ColorChoice;
use crate::services::ProgressSink;
use console::{Emoji, Term, style};
use std::fmt::Display;
use std::sync::OnceLock;

static EMOJI_SUCCESS: Emoji<'_, '_> = Emoji("✔ ", "+ ");
static EMOJI_ERROR: Emoji<'_, '_> = Emoji("✖ ", "x ");

static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initializes the terminal output settings.
/// Should be called once at startup with CLI args.
pub fn init(quiet: bool, color: ColorChoice) {
    QUIET_MODE.set(quiet).ok();

    let no_color = std::env::var("NO_COLOR").is_ok();
    let color_enabled = if no_color {
        // NO_COLOR standard: https://no-color.org/
        false
    } else {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => console::colors_enabled(),
        }
    };

    if !color_enabled {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Download progress written to stderr, so stdout only carries results.
/// Silent in quiet mode.
pub struct TerminalProgress {
    term: Term,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn write(&self, text: &str) {
        if is_quiet() {
            return;
        }
        // Best effort: a broken terminal must not fail the download.
        let _ = self.term.write_str(text);
        let _ = self.term.flush();
    }

    fn clear(&self) {
        if is_quiet() {
            return;
        }
        if self.term.is_term() {
            let _ = self.term.clear_line();
        } else {
            let _ = self.term.write_str("\r");
        }
    }
}

/// Prints a success message with a green checkmark to stderr.
pub fn success(message: impl Display) {
    if is_quiet() {
        return;
    }
    eprintln!("{} {}", EMOJI_SUCCESS, style(message).green());
}

/// Prints an error message with a red X to stderr.
pub fn error(message: impl Display) {
    eprintln!("  {} {}", EMOJI_ERROR, style(message).red());
}

/// Prints a hint/next step message in dim style.
pub fn hint(message: impl Display) {
    if is_quiet() {
        return;
    }
    eprintln!("  {}", style(message).dim());
}

/// Prints a command result to stdout. Never suppressed: scripts read it.
pub fn output(value: impl Display) {
    println!("{}", value);
}
