//! Handles settings for the application. Configuration is written in
//! `settings.toml` and can be overridden with `TALLY__*` environment
//! variables (e.g. `TALLY__SERVER__PORT=8080`) and command line flags.
//!
//! See `settings.toml` for the configuration.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Income and expense tracker")]
struct Args {
    /// Optional config file path (TOML), without extension is fine.
    #[arg(long)]
    config: Option<String>,
    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub static_dir: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 3000,
            static_dir: "web".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backend {
    Memory,
    Sqlite {
        path: String,
    },
    Postgres {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
    },
}

impl Backend {
    pub fn url(&self) -> String {
        match self {
            Backend::Memory => String::from("sqlite::memory:"),
            Backend::Sqlite { path } => format!("sqlite:{}?mode=rwc", path),
            Backend::Postgres {
                host,
                port,
                user,
                password,
                name,
            } => format!("postgres://{user}:{password}@{host}:{port}/{name}"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Memory => "in-memory sqlite",
            Backend::Sqlite { .. } => "sqlite",
            Backend::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Database {
    /// Upper bound of the connection pool.
    pub max_connections: Option<u32>,
    pub backend: Backend,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
    pub database: Database,
}

impl Settings {
    /// Read command line flags, the settings file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut settings = Self::from_sources(path)?;
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }

    fn from_sources(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("TALLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
