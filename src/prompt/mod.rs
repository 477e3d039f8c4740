//! Interactive approval confirmation
//!
//! The prompt is a small state machine:
//!
//! ```text
//! AskYesNo ──y──▶ Done(Approve(default))
//!    │ ──c──▶ AskComment ──▶ AskConfirmWithComment ──y──▶ Done(Approve(comment))
//!    │ ──?──▶ ShowHelp ──▶ AskYesNo
//!    └ other / read error ──▶ Done(Skip)
//! ```

mod terminal;

pub use terminal::{TerminalPrompt, read_line_from};

use crate::error::Result;
use crate::types::PrRef;
use tracing::warn;

/// Lines printed for `?`
pub const HELP_LINES: [&str; 4] = [
    "y - Approve and merge this PR",
    "n - Skip this PR",
    "c - Approve and merge this PR with custom comment",
    "? - Show this help",
];

/// Outcome of the confirmation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalDecision {
    /// Approve with this review comment, then merge
    Approve {
        /// Review body
        comment: String,
    },
    /// Leave the PR alone
    Skip,
}

impl ApprovalDecision {
    /// Whether this decision approves the PR
    pub const fn is_approve(&self) -> bool {
        matches!(self, Self::Approve { .. })
    }
}

/// Line-oriented terminal I/O used by the prompt
pub trait PromptIo {
    /// Ask a yes/no style question and return the raw answer
    fn read_answer(&mut self, prompt: &str) -> Result<String>;

    /// Ask for a free-text review comment
    fn read_comment(&mut self, prompt: &str) -> Result<String>;

    /// Print an informational line
    fn show(&mut self, line: &str);
}

/// States of the confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    /// Initial question for the PR
    AskYesNo,
    /// Print the option legend, then ask again
    ShowHelp,
    /// Read a custom comment
    AskComment,
    /// Confirm approval with the entered comment
    AskConfirmWithComment(String),
    /// Terminal state
    Done(ApprovalDecision),
}

/// Confirmation prompt for a single PR
#[derive(Debug, Clone)]
pub struct ConfirmationPrompt {
    default_comment: String,
}

impl ConfirmationPrompt {
    /// Create a prompt approving with `default_comment` unless told otherwise
    pub fn new(default_comment: impl Into<String>) -> Self {
        Self {
            default_comment: default_comment.into(),
        }
    }

    /// The comment used for a plain `y`
    pub fn default_comment(&self) -> &str {
        &self.default_comment
    }

    /// Run the prompt for `title` until a decision is reached
    pub fn run(&self, title: &str, io: &mut dyn PromptIo) -> ApprovalDecision {
        let mut state = PromptState::AskYesNo;
        loop {
            state = match self.step(state, title, io) {
                PromptState::Done(decision) => return decision,
                next => next,
            };
        }
    }

    /// Advance the state machine by one transition
    pub fn step(&self, state: PromptState, title: &str, io: &mut dyn PromptIo) -> PromptState {
        match state {
            PromptState::AskYesNo => {
                let prompt = format!("Approve and merge PR '{title}'? [y/N/c/?]");
                match io.read_answer(&prompt) {
                    Ok(answer) => self.on_answer(answer.trim()),
                    Err(e) => {
                        warn!(error = %e, "Error reading input");
                        PromptState::Done(ApprovalDecision::Skip)
                    }
                }
            }
            PromptState::ShowHelp => {
                for line in HELP_LINES {
                    io.show(line);
                }
                PromptState::AskYesNo
            }
            PromptState::AskComment => {
                let comment = match io.read_comment("Enter comment to approve the PR with") {
                    Ok(comment) if !comment.trim().is_empty() => comment.trim().to_string(),
                    Ok(_) => self.default_comment.clone(),
                    Err(e) => {
                        warn!(error = %e, "Error reading comment, using default");
                        self.default_comment.clone()
                    }
                };
                PromptState::AskConfirmWithComment(comment)
            }
            PromptState::AskConfirmWithComment(comment) => {
                let prompt =
                    format!("Approve and merge PR '{title}' with comment '{comment}'? [y/N]");
                match io.read_answer(&prompt) {
                    Ok(answer) if matches!(answer.trim(), "y" | "Y") => {
                        PromptState::Done(ApprovalDecision::Approve { comment })
                    }
                    Ok(_) => PromptState::Done(ApprovalDecision::Skip),
                    Err(e) => {
                        warn!(error = %e, "Error reading input");
                        PromptState::Done(ApprovalDecision::Skip)
                    }
                }
            }
            done @ PromptState::Done(_) => done,
        }
    }

    fn on_answer(&self, answer: &str) -> PromptState {
        match answer {
            "y" | "Y" => PromptState::Done(ApprovalDecision::Approve {
                comment: self.default_comment.clone(),
            }),
            "c" | "C" => PromptState::AskComment,
            "?" => PromptState::ShowHelp,
            _ => PromptState::Done(ApprovalDecision::Skip),
        }
    }
}

/// Decides whether an eligible PR gets approved
pub trait Approver: Send {
    /// Decide for one eligible PR
    fn decide(&mut self, pr: &PrRef) -> ApprovalDecision;
}

/// Asks the user through a `PromptIo`
pub struct InteractiveApprover<I> {
    prompt: ConfirmationPrompt,
    io: I,
}

impl<I: PromptIo + Send> InteractiveApprover<I> {
    /// Create an approver prompting through `io`
    pub const fn new(prompt: ConfirmationPrompt, io: I) -> Self {
        Self { prompt, io }
    }

    /// The underlying I/O
    pub const fn io(&self) -> &I {
        &self.io
    }
}

impl<I: PromptIo + Send> Approver for InteractiveApprover<I> {
    fn decide(&mut self, pr: &PrRef) -> ApprovalDecision {
        self.prompt.run(&pr.title, &mut self.io)
    }
}

/// Approves every eligible PR with a fixed comment (`-y`)
#[derive(Debug, Clone)]
pub struct AutoApprover {
    comment: String,
}

impl AutoApprover {
    /// Create an approver that always approves with `comment`
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }
}

impl Approver for AutoApprover {
    fn decide(&mut self, _pr: &PrRef) -> ApprovalDecision {
        ApprovalDecision::Approve {
            comment: self.comment.clone(),
        }
    }
}
