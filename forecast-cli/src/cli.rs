use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastStateMachine, UiState, client_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "3-day weather forecast display")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the WeatherAPI.com credential and location.
    Configure,

    /// Show the forecast, with a reload prompt.
    Show,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show => show().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key =
        inquire::Text::new("WeatherAPI.com API key:").prompt().context("Failed to read API key")?;

    let location = inquire::Text::new("Location (lat,lon):")
        .with_default(&cfg.location)
        .prompt()
        .context("Failed to read location")?;

    cfg.api_key = Some(api_key);
    cfg.location = location;
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let client = client_from_config(&cfg)?;

    let machine =
        ForecastStateMachine::new(client, Duration::from_millis(cfg.loading_delay_ms));
    let mut rx = machine.subscribe();

    loop {
        let state = rx.borrow_and_update().clone();
        match state {
            UiState::Loading => {
                println!("Loading forecast...");
                rx.changed().await.context("state machine went away")?;
            }
            UiState::Success(payload) => {
                render::render_forecast(&payload);

                let again = inquire::Confirm::new("Reload forecast?")
                    .with_default(false)
                    .prompt()
                    .unwrap_or(false);
                if !again {
                    break;
                }
                machine.reload();
            }
            UiState::Error(kind) => {
                eprintln!("Could not load forecast: {kind}");

                let retry = inquire::Confirm::new("Retry?")
                    .with_default(true)
                    .prompt()
                    .unwrap_or(false);
                if !retry {
                    break;
                }
                machine.reload();
            }
        }
    }

    Ok(())
}
