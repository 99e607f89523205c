use crate::error::ConsoleError;

/// Destination of "copy link".
pub trait Clipboard {
    /// # Errors
    ///
    /// Returns [`ConsoleError::Clipboard`] when the text cannot be delivered.
    fn copy(&mut self, text: &str) -> Result<(), ConsoleError>;
}

/// Keeps the last copied text. Used by tests and `--format json` runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
