use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use cep_weather_core::{Config, TemperatureService};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tracing::info;

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cep-weather", version, about = "Current temperature by Brazilian postal code")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: SocketAddr,
    },

    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Look up one postal code and print the reading as JSON.
    Lookup {
        /// Eight-digit postal code, e.g. 01001000.
        code: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { config, command } = self;

        match command {
            Command::Serve { addr } => {
                let service = TemperatureService::from_config(&load_config(config.as_deref())?)?;
                server::serve(addr, service).await?;
            }
            Command::Configure => {
                configure(config.as_deref())?;
            }
            Command::Lookup { code } => {
                let service = TemperatureService::from_config(&load_config(config.as_deref())?)?;
                let reading = service.temperature_for(&code).await?;
                println!("{}", serde_json::to_string_pretty(&reading)?);
            }
        }

        Ok(())
    }
}

/// Config from disk with the environment applied on top.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    Ok(config)
}

fn configure(path: Option<&Path>) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::config_file_path()?,
    };
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.api_key()?;
    config.save_to(&path)?;

    info!(path = %path.display(), "configuration saved");
    Ok(())
}
