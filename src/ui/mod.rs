//! User-facing surface of the assistant

pub mod terminal;

pub use terminal::TerminalUi;

/// Display collaborator: shows results and asks for confirmation
pub trait UserInterface {
    fn show_message(&mut self, text: &str, title: &str);

    /// Returns true only on an explicit affirmative answer
    fn ask_yes_no(&mut self, text: &str, title: &str) -> bool;
}
