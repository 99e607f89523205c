//! Line-oriented prompts on stdin/stderr.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::Context;

/// Ask a yes/no question. `assume_yes` skips the prompt; a non-interactive
/// stdin without it counts as "no".
pub fn confirm(question: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    if !std::io::stdin().is_terminal() {
        tracing::warn!("stdin is not a terminal; pass --yes to confirm");
        return false;
    }
    ask_yes_no(question, &mut std::io::stdin().lock(), &mut std::io::stderr())
}

fn ask_yes_no(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> bool {
    let _ = write!(out, "{question} [e/H] ");
    let _ = out.flush();
    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return false;
    }
    matches!(
        line.trim().to_lowercase().as_str(),
        "e" | "evet" | "y" | "yes"
    )
}

/// Read one line from stdin after printing `label` to stderr.
pub fn read_secret(label: &str) -> anyhow::Result<String> {
    let mut err = std::io::stderr();
    if std::io::stdin().is_terminal() {
        write!(err, "{label}: ")?;
        err.flush()?;
    }
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    let value = line.trim_end_matches(['\r', '\n']).to_string();
    anyhow::ensure!(!value.is_empty(), "{label} is empty");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn turkish_and_english_yes() {
        for answer in ["e\n", "Evet\n", "y\n", "YES\n"] {
            let mut out = Vec::new();
            assert!(ask_yes_no("?", &mut Cursor::new(answer), &mut out), "{answer}");
        }
    }

    #[test]
    fn anything_else_is_no() {
        for answer in ["\n", "h\n", "hayır\n", ""] {
            let mut out = Vec::new();
            assert!(!ask_yes_no("?", &mut Cursor::new(answer), &mut out), "{answer:?}");
        }
    }

    #[test]
    fn question_is_printed() {
        let mut out = Vec::new();
        ask_yes_no("Silinsin mi?", &mut Cursor::new("h\n"), &mut out);
        assert_eq!(String::from_utf8(out).unwrap(), "Silinsin mi? [e/H] ");
    }
}
