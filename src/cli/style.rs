//! Terminal styling helpers

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream, Style};
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Styling shortcuts that respect `NO_COLOR` and non-tty stdout
pub trait Stylize: Display + Sized {
    /// Apply a style when stdout supports color
    fn styled(&self, style: Style) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.style(style))
            .to_string()
    }

    /// Dim, secondary text
    fn muted(&self) -> String {
        self.styled(Style::new().dimmed())
    }

    /// Bold text
    fn emphasis(&self) -> String {
        self.styled(Style::new().bold())
    }

    /// Highlighted value (PR numbers, repositories)
    fn accent(&self) -> String {
        self.styled(Style::new().cyan())
    }

    /// Success text
    fn success(&self) -> String {
        self.styled(Style::new().green())
    }

    /// Warning text
    fn warn(&self) -> String {
        self.styled(Style::new().yellow())
    }

    /// Error text
    fn error(&self) -> String {
        self.styled(Style::new().red().bold())
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Arrow used for list items
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style for long-running remote calls
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
