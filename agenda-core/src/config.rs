//! Agenda configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{AgendaError, AgendaResult};
use crate::store::{FileStore, MemoryStore, OccurrenceStore};

static DEFAULT_BIND: &str = "127.0.0.1:4096";
static DEFAULT_DATA_PATH: &str = "~/.local/share/agenda/appointments.json";

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("agenda").join("appointments.json"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Where occurrences are kept.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Lost on restart.
    Memory,
    /// JSON document at `data_path`.
    #[default]
    File,
}

/// Configuration at ~/.config/agenda/config.toml, overridable with
/// `AGENDA_*` environment variables (e.g. `AGENDA_BIND`, `AGENDA_STORE`).
#[derive(Deserialize, Clone, Debug)]
pub struct AgendaConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default)]
    pub store: StoreBackend,

    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            bind: default_bind(),
            store: StoreBackend::default(),
            data_path: default_data_path(),
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path, creating a commented template on
    /// first run.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("AGENDA"))
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    /// `data_path` with a leading `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_path.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub async fn open_store(&self) -> AgendaResult<Arc<dyn OccurrenceStore>> {
        Ok(match self.store {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File => Arc::new(FileStore::open(self.data_path()).await?),
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Address the HTTP server listens on:
# bind = \"{}\"

# Where appointments are kept: \"file\" or \"memory\"
# store = \"file\"

# Data file for the file store:
# data_path = \"{}\"
",
            DEFAULT_BIND, DEFAULT_DATA_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
