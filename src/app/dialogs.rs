//! Blocking confirmation and notification prompts.

use std::io::{self, BufRead, BufReader, Stdin, Stderr, Write};
use std::sync::{Mutex, MutexGuard};

#[cfg(test)]
use mockall::automock;

/// Interactive prompts used by the delete flow.
#[cfg_attr(test, automock)]
pub trait Dialogs: Send + Sync {
    /// Ask a yes/no question. `false` aborts the pending action.
    fn confirm(&self, message: &str) -> bool;

    /// Tell the user something went wrong.
    fn alert(&self, message: &str);
}

/// Line-oriented prompts on a terminal.
///
/// Also hands out command lines so an interactive session and its prompts
/// read from one buffered input.
pub struct TerminalDialogs<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl TerminalDialogs<BufReader<Stdin>, Stderr> {
    /// Prompts on stdin, messages on stderr.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R, W> TerminalDialogs<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Print `prompt` and read one line. `None` on end of input.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        self.write(prompt, false);

        let mut line = String::new();
        match lock(&self.input).read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                tracing::warn!(event = "dialogs.read_failed", error = %e);
                None
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, text: &str, newline: bool) {
        let mut out = lock(&self.output);
        let result = if newline {
            writeln!(out, "{text}")
        } else {
            write!(out, "{text}")
        };
        if let Err(e) = result.and_then(|_| out.flush()) {
            tracing::warn!(event = "dialogs.write_failed", error = %e);
        }
    }
}

impl<R, W> Dialogs for TerminalDialogs<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn confirm(&self, message: &str) -> bool {
        match self.read_line(&format!("{message} [y/N] ")) {
            Some(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    fn alert(&self, message: &str) {
        self.write(message, true);
    }
}

/// Confirms everything; alerts go to stderr. Used for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Dialogs for AssumeYes {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(event = "dialogs.auto_confirmed", prompt = message);
        true
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn dialogs(input: &str) -> TerminalDialogs<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalDialogs::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn yes_answers_confirm() {
        for answer in ["y\n", "Y\n", "yes\n", "  YES  \n"] {
            assert!(dialogs(answer).confirm("Delete?"), "answer {answer:?}");
        }
    }

    #[test]
    fn anything_else_declines() {
        for answer in ["\n", "n\n", "no\n", "sure\n", ""] {
            assert!(!dialogs(answer).confirm("Delete?"), "answer {answer:?}");
        }
    }

    #[test]
    fn confirm_prints_question() {
        let d = dialogs("n\n");
        d.confirm("Are you sure?");
        assert_eq!(
            String::from_utf8(d.into_output()).unwrap(),
            "Are you sure? [y/N] "
        );
    }

    #[test]
    fn alert_writes_message_line() {
        let d = dialogs("");
        d.alert("Error deleting resident.");
        assert_eq!(
            String::from_utf8(d.into_output()).unwrap(),
            "Error deleting resident.\n"
        );
    }

    #[test]
    fn read_line_shares_input_with_confirm() {
        let d = dialogs("delete 4\ny\nquit\n");

        assert_eq!(d.read_line("> ").as_deref(), Some("delete 4"));
        assert!(d.confirm("Sure?"));
        assert_eq!(d.read_line("> ").as_deref(), Some("quit"));
        assert_eq!(d.read_line("> "), None);
    }

    #[test]
    fn assume_yes_always_confirms() {
        assert!(AssumeYes.confirm("anything"));
    }
}
