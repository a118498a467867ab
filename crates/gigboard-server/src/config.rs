//! Server configuration
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file,
//! `GIGBOARD_*` environment variables, then command-line overrides.

use anyhow::{Context, Result};
use clap::Parser;
use gigboard_core::GigboardError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_CONFIG_FILE: &str = "gigboard.toml";
pub const DEFAULT_SEED_PATH: &str = "data/seed.json";
pub const ENV_PREFIX: &str = "GIGBOARD";

#[derive(Debug, Parser)]
#[command(name = "gigboard-server", version, about = "CRUD service for users, orders and offers")]
pub struct Cli {
    /// Configuration file (TOML); a missing file is not an error
    #[arg(short, long, env = "GIGBOARD_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(long)]
    pub bind: Option<String>,

    /// SQLite URL or file path; `sqlite::memory:` keeps everything in memory
    #[arg(long)]
    pub database_url: Option<String>,

    /// Do not load seed data at startup
    #[arg(long)]
    pub no_seed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub database_url: String,
    pub seed_path: PathBuf,
    pub seed_on_start: bool,
    /// Verify that reference columns point at existing rows on POST/PUT
    pub check_references: bool,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::load_from(&cli.config, cli)
    }

    fn load_from(config_path: &Path, cli: &Cli) -> Result<Self> {
        let mut builder = ::config::Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("database_url", crate::storage::MEMORY_URL)?
            .set_default("seed_path", DEFAULT_SEED_PATH)?
            .set_default("seed_on_start", true)?
            .set_default("check_references", false)?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?
            .add_source(
                ::config::File::from(config_path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            );

        if let Some(bind) = &cli.bind {
            builder = builder.set_override("bind_address", bind.as_str())?;
        }
        if let Some(database_url) = &cli.database_url {
            builder = builder.set_override("database_url", database_url.as_str())?;
        }
        if cli.no_seed {
            builder = builder.set_override("seed_on_start", false)?;
        }

        let settings: Settings = builder
            .build()
            .with_context(|| {
                format!("Failed to read configuration from {}", config_path.display())
            })?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> std::result::Result<(), GigboardError> {
        self.socket_addr()?;
        if self.database_url.trim().is_empty() {
            return Err(GigboardError::Config("database_url must not be empty".into()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, GigboardError> {
        self.bind_address.parse().map_err(|e| {
            GigboardError::Config(format!(
                "Invalid bind_address `{}`: {}",
                self.bind_address, e
            ))
        })
    }
}
