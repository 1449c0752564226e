//! Core domain types for Book Connect.

use std::num::NonZeroUsize;

use chrono::{DateTime, Datelike as _, Utc};
use serde::{Deserialize, Serialize};

mod catalog;
mod criteria;
mod error;
mod theme;

pub use catalog::{Catalog, FilterOption, Labels};
pub use criteria::{ANY, Criteria, CriteriaForm, KeyFilter};
pub use error::{CatalogError, Result};
pub use theme::{Palette, Rgb, ThemeChoice};

/// Books revealed per "show more" step unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: i64 = 36;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for BookId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single catalog entry. `author` and `genres` hold keys into the catalog's
/// label maps, not display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image: String,
    pub published: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl BookRecord {
    pub fn has_genre(&self, key: &str) -> bool {
        self.genres.iter().any(|genre| genre == key)
    }

    pub fn published_year(&self) -> i32 {
        self.published.year()
    }
}

/// Number of records revealed per page. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(CatalogError::InvalidRange(value))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PAGE_SIZE as usize).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<i64> for PageSize {
    type Error = CatalogError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_size: i64,
    pub theme: Option<ThemeChoice>,
    pub catalog_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            theme: None,
            catalog_path: None,
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        self.catalog_path = self
            .catalog_path
            .take()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty());
    }

    pub fn page_size(&self) -> Result<PageSize> {
        PageSize::new(self.page_size)
    }
}
