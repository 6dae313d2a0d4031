//! Line-based terminal front end

use crate::ui::UserInterface;
use crossterm::style::Stylize;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use tracing::warn;

/// Terminal user interface over any reader/writer pair
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
}

impl TerminalUi<BufReader<Stdin>, Stdout> {
    /// UI bound to the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt and read one trimmed line; `None` at end of input
    pub fn read_command(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn write_block(&mut self, text: &str, title: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", title.bold().cyan())?;
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> UserInterface for TerminalUi<R, W> {
    fn show_message(&mut self, text: &str, title: &str) {
        if let Err(e) = self.write_block(text, title) {
            warn!(error = %e, "Failed to write message");
        }
    }

    fn ask_yes_no(&mut self, text: &str, title: &str) -> bool {
        let prompt = self.write_block(text, title).and_then(|_| {
            write!(self.output, "{} ", "Proceed? [y/N]".yellow())?;
            self.output.flush()
        });
        if let Err(e) = prompt {
            warn!(error = %e, "Failed to write confirmation prompt");
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ui(input: &str) -> TerminalUi<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalUi::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yeah"));
    }

    #[test]
    fn test_ask_yes_no_reads_answer() {
        let mut terminal = ui("y\n");
        assert!(terminal.ask_yes_no("kill chrome?", "Confirm Kill"));
        let output = String::from_utf8(terminal.into_output()).unwrap();
        assert!(output.contains("kill chrome?"));
        assert!(output.contains("Confirm Kill"));
    }

    #[test]
    fn test_ask_yes_no_defaults_to_no_at_eof() {
        let mut terminal = ui("");
        assert!(!terminal.ask_yes_no("kill chrome?", "Confirm Kill"));
    }

    #[test]
    fn test_read_command() {
        let mut terminal = ui("  close chrome \n");
        assert_eq!(terminal.read_command().unwrap(), Some("close chrome".into()));
        assert_eq!(terminal.read_command().unwrap(), None);
    }

    #[test]
    fn test_show_message() {
        let mut terminal = ui("");
        terminal.show_message("hello", "Assistant");
        let output = String::from_utf8(terminal.into_output()).unwrap();
        assert!(output.contains("hello"));
    }
}
