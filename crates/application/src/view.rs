//! Display-ready projections of catalog records.

use bookconnect_core::{BookId, BookRecord, Catalog};

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPreview {
    pub id: BookId,
    pub title: String,
    pub author_name: String,
    pub image: String,
}

impl BookPreview {
    pub fn new(record: &BookRecord, catalog: &Catalog) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            author_name: author_name(record, catalog),
            image: record.image.clone(),
        }
    }
}

/// Contents of the active-book overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub id: BookId,
    pub title: String,
    pub subtitle: String,
    pub genres: Vec<String>,
    pub image: String,
    pub description: String,
}

impl BookDetail {
    pub fn new(record: &BookRecord, catalog: &Catalog) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            subtitle: format!(
                "{} ({})",
                author_name(record, catalog),
                record.published_year()
            ),
            genres: record
                .genres
                .iter()
                .map(|key| catalog.genre_name(key).unwrap_or(key).to_string())
                .collect(),
            image: record.image.clone(),
            description: record.description.clone(),
        }
    }
}

fn author_name(record: &BookRecord, catalog: &Catalog) -> String {
    catalog
        .author_name(&record.author)
        .unwrap_or(&record.author)
        .to_string()
}
