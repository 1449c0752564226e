use std::collections::HashMap;

use crate::{ANY, BookId, BookRecord, CatalogError, Result};

/// The full, read-only book collection with its author and genre label maps.
///
/// Construction checks that ids are unique and that every author/genre key a
/// record references has a label. Records and labels keep their source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<BookRecord>,
    authors: Labels,
    genres: Labels,
    index: HashMap<BookId, usize>,
}

/// Key → display name map that remembers insertion order.
///
/// A repeated key takes the later name but keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Labels {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, name)| (key.as_str(), name.as_str()))
    }
}

impl FromIterator<(String, String)> for Labels {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut labels = Labels::default();
        for (key, name) in iter {
            match labels.index.get(&key) {
                Some(&position) => labels.entries[position].1 = name,
                None => {
                    labels.index.insert(key.clone(), labels.entries.len());
                    labels.entries.push((key, name));
                }
            }
        }
        labels
    }
}

/// One entry of an author or genre selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl Catalog {
    pub fn new(
        books: Vec<BookRecord>,
        authors: impl IntoIterator<Item = (String, String)>,
        genres: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let authors: Labels = authors.into_iter().collect();
        let genres: Labels = genres.into_iter().collect();
        let mut index = HashMap::with_capacity(books.len());
        for (position, book) in books.iter().enumerate() {
            if index.insert(book.id.clone(), position).is_some() {
                return Err(CatalogError::InvalidSource(format!(
                    "duplicate book id {}",
                    book.id
                )));
            }
            if !authors.contains_key(&book.author) {
                return Err(CatalogError::InvalidSource(format!(
                    "book {} references unknown author {}",
                    book.id, book.author
                )));
            }
            if let Some(genre) = book.genres.iter().find(|g| !genres.contains_key(*g)) {
                return Err(CatalogError::InvalidSource(format!(
                    "book {} references unknown genre {genre}",
                    book.id
                )));
            }
        }

        Ok(Self {
            books,
            authors,
            genres,
            index,
        })
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&BookRecord> {
        self.books.get(position)
    }

    /// Source position of the record with this exact id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn author_name(&self, key: &str) -> Option<&str> {
        self.authors.get(key)
    }

    pub fn genre_name(&self, key: &str) -> Option<&str> {
        self.genres.get(key)
    }

    pub fn authors(&self) -> &Labels {
        &self.authors
    }

    pub fn genres(&self) -> &Labels {
        &self.genres
    }

    pub fn author_options(&self) -> Vec<FilterOption> {
        filter_options(&self.authors, "All Authors")
    }

    pub fn genre_options(&self) -> Vec<FilterOption> {
        filter_options(&self.genres, "All Genres")
    }
}

/// The "any" entry first, then one entry per label in source order.
fn filter_options(labels: &Labels, any_label: &str) -> Vec<FilterOption> {
    let any = FilterOption {
        value: ANY.to_string(),
        label: any_label.to_string(),
    };
    std::iter::once(any)
        .chain(labels.iter().map(|(key, name)| FilterOption {
            value: key.to_string(),
            label: name.to_string(),
        }))
        .collect()
}
