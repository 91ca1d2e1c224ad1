// UI layer: terminal prompts via `dialoguer`, a spinner per network step
// via `indicatif`, and the console reporting of the final outcome.

use crate::api::TableauClient;
use crate::config::{Args, MoveRequest, Prompter, PASSWORD_ENV};
use crate::error::MoveError;
use crate::workflow::{self, Step};
use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Prompter backed by the terminal. `Password` hides the typed input.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Reading '{prompt}'"))?;
        Ok(value)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        let value = Password::new()
            .with_prompt(prompt)
            .interact()
            .context("Reading password")?;
        Ok(value)
    }

    fn note(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Gather the request, then run the relocation while printing one banner
/// per step.
pub fn run(args: Args) -> Result<()> {
    let password = std::env::var(PASSWORD_ENV).ok();
    let request = MoveRequest::gather(args, password, &mut TerminalPrompter)?;
    tracing::debug!(?request, "request assembled");

    let client = TableauClient::new(&request.server)?;
    let mut progress = StepProgress::default();
    let result = workflow::relocate(&client, &request, |step| progress.start(step));
    progress.finish();

    let relocation = result?;
    tracing::info!(
        workbook_id = %relocation.workbook_id,
        from = %relocation.from_project_id,
        to = %relocation.to_project_id,
        "workbook moved"
    );
    Ok(())
}

/// Console stream a failure is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Where and how a failure is shown. Lookup misses and the no-op case are
/// indented notes under the last step on stdout; server responses go to
/// stderr as received (non-ASCII escaped); anything else gets an `Error:`
/// prefix on stderr.
pub fn failure_line(err: &anyhow::Error) -> (Stream, String) {
    match err.downcast_ref::<MoveError>() {
        Some(e) if e.is_step_note() => (Stream::Stdout, format!("\t{e}")),
        Some(e @ MoveError::Http { .. }) => (Stream::Stderr, e.to_string()),
        Some(e) => (Stream::Stderr, format!("Error: {e}")),
        None => (Stream::Stderr, format!("Error: {err:#}")),
    }
}

pub fn report_failure(err: &anyhow::Error) {
    match failure_line(err) {
        (Stream::Stdout, line) => println!("{line}"),
        (Stream::Stderr, line) => eprintln!("{line}"),
    }
}

/// Banner + spinner for whichever step is currently running.
#[derive(Default)]
struct StepProgress {
    spinner: Option<ProgressBar>,
}

impl StepProgress {
    fn start(&mut self, step: &Step) {
        self.finish();
        println!("\n{step}");
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Waiting for server...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
