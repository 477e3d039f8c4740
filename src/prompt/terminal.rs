//! Terminal-backed prompt I/O using dialoguer

use super::PromptIo;
use crate::error::{Error, Result};
use dialoguer::Input;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use std::io::{BufRead, IsTerminal, Write};

/// Reads answers from the terminal
pub struct TerminalPrompt {
    theme: Box<dyn Theme + Send>,
}

impl TerminalPrompt {
    /// Prompt with colors
    pub fn colorful() -> Self {
        Self {
            theme: Box::new(ColorfulTheme::default()),
        }
    }

    /// Prompt without styling (for dumb terminals / `NO_COLOR`)
    pub fn plain() -> Self {
        Self {
            theme: Box::new(SimpleTheme),
        }
    }

    fn read_line(&self, prompt: &str, what: &str) -> Result<String> {
        // dialoguer draws on stderr and refuses to run when it is not a tty
        if !std::io::stderr().is_terminal() {
            let mut stdout = anstream::stdout();
            return read_line_from(&mut std::io::stdin().lock(), &mut stdout, prompt)
                .map_err(|e| Error::Input(format!("Failed to read {what}: {e}")));
        }

        Input::<String>::with_theme(self.theme.as_ref())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Input(format!("Failed to read {what}: {e}")))
    }
}

/// Print `prompt` and read one line from a plain (piped) reader.
///
/// End of input is an error; the trailing newline is stripped.
pub fn read_line_from(
    reader: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: &str,
) -> Result<String> {
    write!(out, "{prompt} ").map_err(|e| Error::Input(e.to_string()))?;
    out.flush().map_err(|e| Error::Input(e.to_string()))?;

    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| Error::Input(e.to_string()))?;
    if read == 0 {
        return Err(Error::Input("end of input".to_string()));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::colorful()
    }
}

impl PromptIo for TerminalPrompt {
    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt, "answer")
    }

    fn read_comment(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt, "comment")
    }

    fn show(&mut self, line: &str) {
        anstream::println!("{line}");
    }
}
