//! Command-line front end

mod context;
mod progress;
pub mod style;
mod triage;

pub use context::RunOptions;

/// Run the tool with parsed options
pub async fn run(options: RunOptions) -> anyhow::Result<()> {
    triage::run_triage(options).await
}
