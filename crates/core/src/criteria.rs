use serde::{Deserialize, Serialize};

/// Selector value meaning "no constraint".
pub const ANY: &str = "any";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyFilter {
    #[default]
    Any,
    Key(String),
}

impl KeyFilter {
    /// Empty input and `"any"` both mean no constraint.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ANY {
            KeyFilter::Any
        } else {
            KeyFilter::Key(raw.to_string())
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        KeyFilter::Key(key.into())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, KeyFilter::Any)
    }

    pub fn as_str(&self) -> &str {
        match self {
            KeyFilter::Any => ANY,
            KeyFilter::Key(key) => key,
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyFilter::Any => true,
            KeyFilter::Key(wanted) => wanted == key,
        }
    }

    pub fn matches_any_of(&self, keys: &[String]) -> bool {
        match self {
            KeyFilter::Any => true,
            KeyFilter::Key(wanted) => keys.iter().any(|key| key == wanted),
        }
    }
}

impl std::fmt::Display for KeyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated filter request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    pub title: String,
    pub author: KeyFilter,
    pub genre: KeyFilter,
}

impl Criteria {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author(mut self, author: KeyFilter) -> Self {
        self.author = author;
        self
    }

    pub fn with_genre(mut self, genre: KeyFilter) -> Self {
        self.genre = genre;
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.title.trim().is_empty() && self.author.is_any() && self.genre.is_any()
    }
}

/// Raw search form submission. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaForm {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl From<CriteriaForm> for Criteria {
    fn from(form: CriteriaForm) -> Self {
        Self {
            title: form.title,
            author: KeyFilter::parse(&form.author),
            genre: KeyFilter::parse(&form.genre),
        }
    }
}

impl From<&Criteria> for CriteriaForm {
    fn from(criteria: &Criteria) -> Self {
        Self {
            title: criteria.title.clone(),
            author: criteria.author.to_string(),
            genre: criteria.genre.to_string(),
        }
    }
}
