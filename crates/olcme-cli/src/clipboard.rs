//! Terminal clipboard through the OSC 52 escape sequence.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use olcme_console::{Clipboard, ConsoleError};

/// Writes `ESC ] 52 ; c ; <base64> BEL` to the wrapped writer.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<std::io::Stderr> {
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            out: std::io::stderr(),
        }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\u{1b}]52;c;{}\u{7}", STANDARD.encode(text))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|error| ConsoleError::Clipboard(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_base64() {
        assert_eq!(
            osc52_sequence("https://anket.olcme.tr/p/7"),
            "\u{1b}]52;c;aHR0cHM6Ly9hbmtldC5vbGNtZS50ci9wLzc=\u{7}"
        );
    }

    #[test]
    fn copy_writes_to_the_sink() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.copy("x").unwrap();
        assert_eq!(clipboard.into_inner(), b"\x1b]52;c;eA==\x07");
    }
}
