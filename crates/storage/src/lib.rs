//! Catalog and settings loading.
//!
//! Catalog and settings files are only ever read; the one write is creating
//! the config directory so the log file has somewhere to live.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bookconnect_core::{BookRecord, Catalog, CatalogError, Settings};
use serde::Deserialize;
use serde_json::{Map, Value};

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "bookconnect.log";

#[derive(Debug, Deserialize)]
struct CatalogSource {
    books: Vec<BookRecord>,
    authors: Map<String, Value>,
    genres: Map<String, Value>,
}

/// Label maps stay in file order, which is the order the selectors list them.
fn labels(kind: &str, map: Map<String, Value>) -> Result<Vec<(String, String)>, CatalogError> {
    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(name) => Ok((key, name)),
            other => Err(CatalogError::InvalidSource(format!(
                "{kind} {key} has non-string label {other}"
            ))),
        })
        .collect()
}

/// Parses and validates a JSON catalog. Any structural problem is reported as
/// [`CatalogError::InvalidSource`].
pub fn parse_catalog(json: &str) -> anyhow::Result<Catalog> {
    let source: CatalogSource = serde_json::from_str(json)
        .map_err(|err| CatalogError::InvalidSource(err.to_string()))?;
    let authors = labels("author", source.authors)?;
    let genres = labels("genre", source.genres)?;
    let catalog = Catalog::new(source.books, authors, genres)?;
    tracing::info!(
        books = catalog.len(),
        authors = catalog.authors().len(),
        genres = catalog.genres().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn load_catalog(path: impl AsRef<Path>) -> anyhow::Result<Catalog> {
    let path = path.as_ref();
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(CatalogError::InvalidSource(format!(
                "catalog file {} not found",
                path.display()
            ))
            .into());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read catalog {}", path.display()));
        }
    };
    parse_catalog(&json).with_context(|| format!("load catalog {}", path.display()))
}

/// The sample catalog compiled into the binary.
pub fn bundled_catalog() -> anyhow::Result<Catalog> {
    parse_catalog(BUNDLED_CATALOG).context("load bundled catalog")
}

/// Read-only view of the config directory.
#[derive(Debug, Clone)]
pub struct Storage {
    config_dir: PathBuf,
}

impl Storage {
    pub fn open(config_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)
            .with_context(|| format!("create config dir {}", config_dir.display()))?;
        Ok(Self {
            config_dir: config_dir.to_path_buf(),
        })
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.config_dir.join(LOG_FILE)
    }

    /// Missing settings fall back to defaults; a malformed file is an error.
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        let path = self.settings_path();
        let mut settings = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str::<Settings>(&json)
                .with_context(|| format!("parse settings {}", path.display()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Settings::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read settings {}", path.display()));
            }
        };
        settings.normalize();
        Ok(settings)
    }
}
