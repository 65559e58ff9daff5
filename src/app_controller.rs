use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::app_config::Config;
use crate::comparison::{ComparisonOrchestrator, ComparisonState, RatingOutcome, RequestOutcome, RequestStatus};
use crate::errors::ComparisonError;
use crate::language_utils;
use crate::service::TranslationBackend;
use crate::service::http::HttpBackend;
use crate::translation_service::TranslationService;

// @module: Application controller for comparison sessions

/// One command typed during an interactive comparison session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Print the current ranking
    Show,
    /// Move the candidate at this 1-based rank up
    Up(usize),
    /// Move the candidate at this 1-based rank down
    Down(usize),
    /// Rate a candidate with raw input
    Rate { id: String, value: String },
    /// Submit the current ranking
    Save,
    /// Fetch the same comparison again
    Refresh,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or_else(|| anyhow!("Empty command"))?.to_lowercase();

        let command = match verb.as_str() {
            "show" | "ls" => Self::Show,
            "up" | "u" => Self::Up(parse_rank(parts.next())?),
            "down" | "d" => Self::Down(parse_rank(parts.next())?),
            "rate" | "r" => {
                let id = parts.next().ok_or_else(|| anyhow!("Usage: rate <id> <value>"))?;
                let value = parts.collect::<Vec<_>>().join(" ");
                Self::Rate { id: id.to_string(), value }
            }
            "save" | "s" => Self::Save,
            "refresh" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(anyhow!("Unknown command: {} (type 'help')", other)),
        };

        Ok(command)
    }
}

fn parse_rank(arg: Option<&str>) -> Result<usize> {
    let arg = arg.ok_or_else(|| anyhow!("Missing rank"))?;
    match arg.parse::<usize>() {
        Ok(rank) if rank > 0 => Ok(rank),
        _ => Err(anyhow!("Rank must be a positive number: {}", arg)),
    }
}

const SESSION_HELP: &str = "\
Commands:
  show            print the current ranking
  up <rank>       move a translation one place up
  down <rank>     move a translation one place down
  rate <id> <n>   rate a translation from 1 to 10
  save            save rankings and ratings
  refresh         fetch the translations again
  quit            leave the session";

/// Main application controller for comparison sessions
pub struct Controller {
    // @field: App configuration
    config: Config,
    orchestrator: ComparisonOrchestrator,
    translations: TranslationService,
}

impl Controller {
    // @method: Create a controller talking to the configured service
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let backend = HttpBackend::new(config.service.endpoint.clone(), config.service.timeout());
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Create a controller on top of any backend
    pub fn with_backend(config: Config, backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            config,
            orchestrator: ComparisonOrchestrator::new(Arc::clone(&backend)),
            translations: TranslationService::new(backend),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &ComparisonOrchestrator {
        &self.orchestrator
    }

    /// Fetch a comparison and report the result to `output`
    pub async fn fetch<W: Write>(&self, source_text: &str, target_language: &str, output: &mut W) -> Result<RequestStatus> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message("Fetching translations...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let outcome = self.orchestrator.request_comparison(source_text, target_language).await;
        spinner.finish_and_clear();

        match outcome {
            Err(ComparisonError::Validation(message)) => writeln!(output, "{}", message)?,
            Err(e) => writeln!(output, "{}", e)?,
            Ok(RequestOutcome::Applied(RequestStatus::Error(message))) => writeln!(output, "{}", message)?,
            Ok(RequestOutcome::Applied(_)) => write!(output, "{}", render_comparison(&self.orchestrator.state()))?,
            Ok(RequestOutcome::Superseded) => debug!("Comparison superseded by a newer request"),
            Ok(RequestOutcome::Cancelled) => writeln!(output, "Request cancelled.")?,
        }

        Ok(self.orchestrator.status())
    }

    /// Apply `id=value` rating pairs given up front
    pub fn apply_ratings<W: Write>(&self, ratings: &[(String, String)], output: &mut W) -> Result<()> {
        for (id, value) in ratings {
            self.rate(id, value, output)?;
        }
        Ok(())
    }

    fn rate<W: Write>(&self, id: &str, value: &str, output: &mut W) -> Result<()> {
        match self.orchestrator.apply_rating(id, value) {
            RatingOutcome::Changed(rating) => writeln!(output, "{}: rating {}", id, rating)?,
            RatingOutcome::Unchanged => match self.orchestrator.state().rating(id) {
                Some(rating) => writeln!(output, "{}: rating {}", id, rating)?,
                None => writeln!(output, "No translation with id '{}'", id)?,
            },
        }
        Ok(())
    }

    /// Submit the current ranking and report the result
    pub async fn save<W: Write>(&self, output: &mut W) -> Result<RequestStatus> {
        match self.orchestrator.save_rankings().await {
            Ok(RequestStatus::Success) => writeln!(output, "Rankings saved successfully!")?,
            Ok(status) => writeln!(output, "{}", status.error_message().unwrap_or("Failed to save rankings."))?,
            Err(e) => writeln!(output, "{}", e)?,
        }
        Ok(self.orchestrator.submission_status())
    }

    /// Run one session command. Returns false when the session should end.
    pub async fn execute<W: Write>(&self, command: SessionCommand, output: &mut W) -> Result<bool> {
        match command {
            SessionCommand::Show => write!(output, "{}", render_comparison(&self.orchestrator.state()))?,
            SessionCommand::Up(rank) | SessionCommand::Down(rank) if rank == 0 => {
                writeln!(output, "Rank must be a positive number: 0")?;
            }
            SessionCommand::Up(rank) => {
                let state = self.orchestrator.move_up(rank - 1);
                write!(output, "{}", render_comparison(&state))?;
            }
            SessionCommand::Down(rank) => {
                let state = self.orchestrator.move_down(rank - 1);
                write!(output, "{}", render_comparison(&state))?;
            }
            SessionCommand::Rate { id, value } => self.rate(&id, &value, output)?,
            SessionCommand::Save => {
                self.save(output).await?;
            }
            SessionCommand::Refresh => {
                let state = self.orchestrator.state();
                self.fetch(state.source_text(), state.target_language(), output).await?;
            }
            SessionCommand::Help => writeln!(output, "{}", SESSION_HELP)?,
            SessionCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Read commands line by line until `quit` or end of input
    pub async fn run_session<R, W>(&self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(output, "Type 'help' for commands.")?;
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<SessionCommand>() {
                Ok(command) => {
                    if !self.execute(command, output).await? {
                        break;
                    }
                }
                Err(e) => writeln!(output, "{}", e)?,
            }
            output.flush()?;
        }
        Ok(())
    }

    /// Translate one text with one model and report the result
    pub async fn translate<W: Write>(&self, message: &str, language: &str, model: &str, output: &mut W) -> Result<RequestStatus> {
        match self.translations.translate(message, language, model).await {
            Ok(text) => {
                writeln!(output, "{}", text)?;
                write!(output, "{}", render_language_stats(&self.translations.language_stats()))?;
            }
            Err(ComparisonError::Validation(message)) => writeln!(output, "{}", message)?,
            Err(_) => writeln!(output, "{}", self.translations.status().error_message().unwrap_or_default())?,
        }
        Ok(self.translations.status())
    }

    /// Cancel the loading comparison on every interrupt.
    ///
    /// Returns true when an interrupt arrives with nothing loading, false once
    /// the sender is dropped.
    pub async fn cancel_on_interrupt(&self, mut interrupts: mpsc::UnboundedReceiver<()>) -> bool {
        while interrupts.recv().await.is_some() {
            if !self.orchestrator.cancel() {
                return true;
            }
        }
        false
    }
}

/// Human-readable ranking of a comparison
pub fn render_comparison(state: &ComparisonState) -> String {
    if state.is_empty() {
        return "No translations yet.\n".to_string();
    }

    let mut text = format!(
        "Translations into '{}' of \"{}\":\n",
        state.target_language(),
        state.source_text()
    );
    for (rank, candidate, rating) in state.ranked() {
        text.push_str(&format!(
            "  {}. {} [{}]  rating {}\n     {}\n",
            rank, candidate.model_name, candidate.id, rating, candidate.content
        ));
    }
    text
}

/// Successful translations per language, most used first
pub fn render_language_stats(stats: &HashMap<String, usize>) -> String {
    if stats.is_empty() {
        return String::new();
    }

    let mut entries: Vec<_> = stats.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut text = "Language stats:\n".to_string();
    for (code, count) in entries {
        let name = language_utils::get_language_name(code).unwrap_or_else(|_| code.clone());
        let noun = if *count == 1 { "translation" } else { "translations" };
        text.push_str(&format!("  {}: {} {}\n", name, count, noun));
    }
    text
}

/// Split `id=value` into its parts
pub fn parse_rating_arg(arg: &str) -> Result<(String, String)> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected ID=VALUE, got: {}", arg))?;
    if id.trim().is_empty() {
        return Err(anyhow!("Missing candidate id in: {}", arg));
    }
    Ok((id.trim().to_string(), value.to_string()))
}
