use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::Context;
use cityweather_core::{
    CityRegistry, Config, ForecastProvider, Navigation, Navigator, ViewState,
    provider_from_config,
    view::{SELECT_PROMPT, page_meta},
};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Select};
use tracing::warn;

use crate::render;

const BACK: &str = "← Back";
const QUIT: &str = "Quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Weather for a fixed list of cities")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick cities interactively; the default when no command is given.
    Browse,

    /// Show the forecast page for one city.
    Show {
        /// City slug, e.g. "recife".
        slug: String,
    },

    /// List every city route with its page title.
    Routes,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub async fn run(self) -> anyhow::Result<ExitCode> {
        self.run_with(Config::load).await
    }

    /// `load` is only called by the commands that fetch; `routes` works without a config.
    async fn run_with<F>(self, load: F) -> anyhow::Result<ExitCode>
    where
        F: FnOnce() -> anyhow::Result<Config>,
    {
        match self.command.unwrap_or(Command::Browse) {
            Command::Browse => {
                let config = load()?;
                let provider = provider_from_config(&config);
                browse(&config, provider.as_ref()).await
            }
            Command::Show { slug } => {
                let config = load()?;
                let provider = provider_from_config(&config);
                show(&config, provider.as_ref(), &slug).await
            }
            Command::Routes => {
                routes(&mut io::stdout().lock())?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// In-memory navigation: Selection and Details alternate until the user quits.
async fn browse(config: &Config, provider: &dyn ForecastProvider) -> anyhow::Result<ExitCode> {
    let mut nav = Navigator::new(CityRegistry::default(), config.hours, Navigation::InMemory);
    let selection = nav.selection();
    let mut out = io::stdout();

    loop {
        render::print_selection(&mut out, &selection)?;

        let labels: Vec<&str> = selection.entries.iter().map(|e| e.label).collect();
        let Some(label) = prompt(Select::new(SELECT_PROMPT, labels))? else {
            return Ok(ExitCode::SUCCESS);
        };

        let attempt = match nav.select_label(label) {
            Ok(attempt) => attempt,
            Err(e) => {
                warn!(error = %e, "Selection did not match a city");
                continue;
            }
        };

        render::print_state(&mut out, nav.state(), &selection)?;
        let state = nav.open(provider, &attempt).await;
        render::print_state(&mut out, state, &selection)?;

        match prompt(Select::new("What next?", vec![BACK, QUIT]))? {
            Some(BACK) => nav.back(),
            _ => return Ok(ExitCode::SUCCESS),
        }
    }
}

/// `None` when the user cancels the prompt.
fn prompt<T: std::fmt::Display>(select: Select<'_, T>) -> anyhow::Result<Option<T>> {
    match select.prompt() {
        Ok(choice) => Ok(Some(choice)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read selection"),
    }
}

/// Routed navigation: render a single city page, no Back action.
async fn show(
    config: &Config,
    provider: &dyn ForecastProvider,
    slug: &str,
) -> anyhow::Result<ExitCode> {
    let registry = CityRegistry::default();
    let meta = page_meta(&registry, slug);
    let mut nav = Navigator::new(registry, config.hours, Navigation::Routed);
    let selection = nav.selection();
    let mut out = io::stdout();

    let Ok(attempt) = nav.select_slug(slug) else {
        render::print_not_found(&mut out)?;
        return Ok(ExitCode::FAILURE);
    };

    writeln!(out, "{}", meta.title)?;
    render::print_state(&mut out, nav.state(), &selection)?;

    let state = nav.open(provider, &attempt).await;
    render::print_state(&mut out, state, &selection)?;

    Ok(match state {
        ViewState::Details(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn routes<W: Write>(out: &mut W) -> io::Result<()> {
    let registry = CityRegistry::default();
    for city in registry.entries() {
        let meta = page_meta(&registry, city.slug);
        writeln!(out, "{:<18}{}", city.route(), meta.title)?;
    }
    Ok(())
}
