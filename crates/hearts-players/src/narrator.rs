//! Optional human-readable commentary from the scoring strategies.

use std::fmt;
use tracing::{Level, event};

/// Receives narration lines. Implementations must not feed anything back
/// into the decision being narrated.
pub trait Narrator: Send {
    fn say(&mut self, message: fmt::Arguments<'_>);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Narrator for Silent {
    fn say(&mut self, _message: fmt::Arguments<'_>) {}
}

/// Forwards each line as a `DEBUG` event on the `hearts_players::narration` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNarrator;

impl Narrator for TracingNarrator {
    fn say(&mut self, message: fmt::Arguments<'_>) {
        event!(target: "hearts_players::narration", Level::DEBUG, "{}", message);
    }
}

/// Collects lines in memory.
impl Narrator for Vec<String> {
    fn say(&mut self, message: fmt::Arguments<'_>) {
        self.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{Narrator, Silent};

    #[test]
    fn vec_narrator_records_formatted_lines() {
        let mut lines: Vec<String> = Vec::new();
        lines.say(format_args!("{}: {}", "QS", 22));
        assert_eq!(lines, vec!["QS: 22".to_string()]);
    }

    #[test]
    fn silent_accepts_anything() {
        let mut silent = Silent;
        silent.say(format_args!("ignored {}", 1));
    }
}
