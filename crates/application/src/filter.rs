//! Criteria matching over the catalog.

use std::sync::Arc;

use bookconnect_core::{BookRecord, Catalog, Criteria};

use crate::paginate::Window;

/// Ordered catalog positions matching one set of criteria.
///
/// Shared immutably; a new filter produces a new set rather than editing this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    positions: Arc<[usize]>,
}

impl ResultSet {
    pub fn all(catalog: &Catalog) -> Self {
        Self {
            positions: (0..catalog.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn records<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a BookRecord> {
        self.positions.iter().filter_map(|pos| catalog.get(*pos))
    }

    /// Records inside `window`, clamped to the set's bounds.
    pub fn slice<'a>(&self, catalog: &'a Catalog, window: Window) -> Vec<&'a BookRecord> {
        let end = window.end.min(self.len());
        let start = window.start.min(end);
        self.positions[start..end]
            .iter()
            .filter_map(|pos| catalog.get(*pos))
            .collect()
    }
}

pub fn filter(catalog: &Catalog, criteria: &Criteria) -> ResultSet {
    if criteria.is_unfiltered() {
        return ResultSet::all(catalog);
    }

    let query = TitleQuery::new(&criteria.title);
    let positions = catalog
        .books()
        .iter()
        .enumerate()
        .filter(|(_, book)| passes(book, &query, criteria))
        .map(|(pos, _)| pos)
        .collect();

    ResultSet { positions }
}

/// Whether a single record satisfies `criteria`; [`filter`] keeps exactly these.
pub fn matches(book: &BookRecord, criteria: &Criteria) -> bool {
    passes(book, &TitleQuery::new(&criteria.title), criteria)
}

fn passes(book: &BookRecord, query: &TitleQuery, criteria: &Criteria) -> bool {
    query.matches(&book.title)
        && criteria.author.matches(&book.author)
        && criteria.genre.matches_any_of(&book.genres)
}

/// Lowercased once so a scan doesn't re-lowercase the query per record.
struct TitleQuery(Option<String>);

impl TitleQuery {
    fn new(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(raw.to_lowercase()))
        }
    }

    fn matches(&self, title: &str) -> bool {
        match &self.0 {
            None => true,
            Some(query) => title.to_lowercase().contains(query.as_str()),
        }
    }
}
