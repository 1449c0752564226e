//! Test helpers and fixtures.

use std::collections::BTreeMap;
use std::sync::Arc;

use bookconnect_application::{CatalogSession, Renderer};
use bookconnect_core::{BookId, BookRecord, Catalog, PageSize, Palette};
use chrono::{TimeZone as _, Utc};

pub const AUTHOR_KEYS: [&str; 3] = ["author-1", "author-2", "author-3"];
pub const GENRE_KEYS: [&str; 3] = ["fiction", "scifi", "poetry"];

pub fn book(id: &str, title: &str, author: &str, genres: &[&str]) -> BookRecord {
    BookRecord {
        id: BookId::from(id),
        title: title.to_string(),
        author: author.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        image: format!("https://covers.example.org/{id}.jpg"),
        published: Utc.with_ymd_and_hms(2010, 3, 14, 0, 0, 0).unwrap(),
        description: format!("Description of {title}."),
    }
}

/// Builds a catalog whose label maps cover [`AUTHOR_KEYS`] and [`GENRE_KEYS`].
pub fn catalog_of(books: Vec<BookRecord>) -> Catalog {
    let authors: BTreeMap<String, String> = AUTHOR_KEYS
        .iter()
        .enumerate()
        .map(|(i, key)| (key.to_string(), format!("Author {}", i + 1)))
        .collect();
    let genres: BTreeMap<String, String> = GENRE_KEYS
        .iter()
        .map(|key| (key.to_string(), key.to_uppercase()))
        .collect();
    Catalog::new(books, authors, genres).unwrap()
}

/// A(fiction), B(scifi), C(fiction).
pub fn scenario_catalog() -> Catalog {
    catalog_of(vec![
        book("A", "A-Title", "author-1", &["fiction"]),
        book("B", "B-Title", "author-2", &["scifi"]),
        book("C", "C-Title", "author-1", &["fiction"]),
    ])
}

/// `len` records with distinct ids `b0..`, cycling through the fixture keys.
pub fn numbered_catalog(len: usize) -> Catalog {
    let books = (0..len)
        .map(|i| {
            book(
                &format!("b{i}"),
                &format!("Book {i}"),
                AUTHOR_KEYS[i % AUTHOR_KEYS.len()],
                &[GENRE_KEYS[i % GENRE_KEYS.len()]],
            )
        })
        .collect();
    catalog_of(books)
}

pub fn session_over(catalog: Catalog, page_size: i64) -> CatalogSession {
    CatalogSession::new(Arc::new(catalog), PageSize::new(page_size).unwrap(), None)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Replaced {
        ids: Vec<String>,
        remaining: usize,
        is_empty: bool,
    },
    Appended {
        ids: Vec<String>,
        remaining: usize,
        is_exhausted: bool,
    },
    Selection(Option<String>),
    Theme(Palette),
}

/// Renderer that records every emission by book id.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub emitted: Vec<Emitted>,
}

impl RecordingRenderer {
    pub fn last(&self) -> Option<&Emitted> {
        self.emitted.last()
    }
}

fn ids(records: &[&BookRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

impl Renderer for RecordingRenderer {
    fn on_results_replaced(&mut self, visible: &[&BookRecord], remaining: usize, is_empty: bool) {
        self.emitted.push(Emitted::Replaced {
            ids: ids(visible),
            remaining,
            is_empty,
        });
    }

    fn on_results_appended(&mut self, delta: &[&BookRecord], remaining: usize, is_exhausted: bool) {
        self.emitted.push(Emitted::Appended {
            ids: ids(delta),
            remaining,
            is_exhausted,
        });
    }

    fn on_selection_changed(&mut self, record: Option<&BookRecord>) {
        self.emitted
            .push(Emitted::Selection(record.map(|r| r.id.to_string())));
    }

    fn on_theme_resolved(&mut self, palette: Palette) {
        self.emitted.push(Emitted::Theme(palette));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_fixture_catalogs() {
        assert_eq!(scenario_catalog().len(), 3);
        let catalog = numbered_catalog(7);
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.get(4).map(|b| b.author.as_str()), Some("author-2"));
    }
}
