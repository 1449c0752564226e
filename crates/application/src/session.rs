//! The stateful side of browsing: current listing, active book, theme.

use std::sync::Arc;

use bookconnect_core::{BookRecord, Catalog, Criteria, PageSize, Palette, ThemeChoice};

use crate::filter::{self, ResultSet};
use crate::paginate::{self, PageState, Window};
use crate::{selection, theme};

/// Receives everything the session wants painted.
pub trait Renderer {
    /// The list was replaced; `visible` is the first page of the new results.
    fn on_results_replaced(&mut self, visible: &[&BookRecord], remaining: usize, is_empty: bool);

    /// `delta` holds only the newly revealed records, to be appended.
    fn on_results_appended(&mut self, delta: &[&BookRecord], remaining: usize, is_exhausted: bool);

    fn on_selection_changed(&mut self, record: Option<&BookRecord>);

    fn on_theme_resolved(&mut self, palette: Palette);
}

/// Criteria, results and page always travel together so the page is never
/// measured against a stale result set.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Listing {
    criteria: Option<Criteria>,
    results: ResultSet,
    page: PageState,
}

impl Listing {
    fn unfiltered(catalog: &Catalog, page_size: PageSize) -> Self {
        Self {
            criteria: None,
            results: ResultSet::all(catalog),
            page: PageState::first(page_size),
        }
    }

    fn filtered(catalog: &Catalog, criteria: Criteria, page_size: PageSize) -> Self {
        Self {
            results: filter::filter(catalog, &criteria),
            criteria: Some(criteria),
            page: PageState::first(page_size),
        }
    }

    fn next_page(&self) -> Option<Self> {
        if paginate::is_exhausted(self.results.len(), self.page) {
            return None;
        }
        Some(Self {
            criteria: self.criteria.clone(),
            results: self.results.clone(),
            page: self.page.next(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CatalogSession {
    catalog: Arc<Catalog>,
    page_size: PageSize,
    listing: Listing,
    active: Option<usize>,
    theme_choice: Option<ThemeChoice>,
    system_prefers_dark: Option<bool>,
}

impl CatalogSession {
    /// Starts on the full catalog at page 1. `system_prefers_dark` is sampled
    /// once by the caller and kept for the session.
    pub fn new(
        catalog: Arc<Catalog>,
        page_size: PageSize,
        system_prefers_dark: Option<bool>,
    ) -> Self {
        let listing = Listing::unfiltered(&catalog, page_size);
        tracing::debug!(
            books = catalog.len(),
            page_size = page_size.get(),
            "catalog session initialized"
        );
        Self {
            catalog,
            page_size,
            listing,
            active: None,
            theme_choice: None,
            system_prefers_dark,
        }
    }

    pub fn with_theme_choice(mut self, choice: Option<ThemeChoice>) -> Self {
        self.theme_choice = choice;
        self
    }

    /// Emits the startup paint: theme first, then the first page.
    pub fn start<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.on_theme_resolved(self.palette());
        self.emit_replaced(renderer);
    }

    pub fn submit_filter<R: Renderer + ?Sized>(&mut self, criteria: Criteria, renderer: &mut R) {
        self.listing = Listing::filtered(&self.catalog, criteria, self.page_size);
        tracing::debug!(
            matches = self.listing.results.len(),
            remaining = self.remaining(),
            "filter submitted"
        );
        self.emit_replaced(renderer);
    }

    /// Returns `false` without emitting anything when every match is already shown.
    pub fn advance_page<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        let Some(next) = self.listing.next_page() else {
            tracing::debug!("advance ignored: no remaining matches");
            return false;
        };
        self.listing = next;

        let delta = paginate::window_for(self.listing.results.len(), self.listing.page);
        let records = self.listing.results.slice(&self.catalog, delta);
        tracing::debug!(
            page = self.listing.page.page_number(),
            revealed = records.len(),
            remaining = self.remaining(),
            "page advanced"
        );
        renderer.on_results_appended(&records, self.remaining(), self.is_exhausted());
        true
    }

    /// Drops the criteria and goes back to the full catalog at page 1.
    pub fn reset<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.listing = Listing::unfiltered(&self.catalog, self.page_size);
        tracing::debug!("filter reset");
        self.emit_replaced(renderer);
    }

    /// Unknown ids leave the current selection alone and emit nothing.
    pub fn select_item<R: Renderer + ?Sized>(&mut self, id: &str, renderer: &mut R) -> bool {
        let Some(record) = selection::resolve(&self.catalog, id) else {
            tracing::warn!(id, "selection ignored: unknown book id");
            return false;
        };
        self.active = self.catalog.position_of(id);
        renderer.on_selection_changed(Some(record));
        true
    }

    pub fn clear_selection<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.active = None;
        renderer.on_selection_changed(None);
    }

    pub fn set_theme_choice<R: Renderer + ?Sized>(&mut self, choice: ThemeChoice, renderer: &mut R) {
        self.theme_choice = Some(choice);
        tracing::debug!(theme = %choice, "theme chosen");
        renderer.on_theme_resolved(self.palette());
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn criteria(&self) -> Option<&Criteria> {
        self.listing.criteria.as_ref()
    }

    pub fn results(&self) -> &ResultSet {
        &self.listing.results
    }

    pub fn page_state(&self) -> PageState {
        self.listing.page
    }

    pub fn remaining(&self) -> usize {
        paginate::remaining(self.listing.results.len(), self.listing.page)
    }

    pub fn is_exhausted(&self) -> bool {
        paginate::is_exhausted(self.listing.results.len(), self.listing.page)
    }

    pub fn is_empty(&self) -> bool {
        self.listing.results.is_empty()
    }

    /// Every record revealed so far, for a full repaint.
    pub fn visible(&self) -> Vec<&BookRecord> {
        let window = paginate::revealed(self.listing.results.len(), self.listing.page);
        self.listing.results.slice(&self.catalog, window)
    }

    pub fn active(&self) -> Option<&BookRecord> {
        self.active.and_then(|pos| self.catalog.get(pos))
    }

    pub fn theme_choice(&self) -> ThemeChoice {
        theme::effective_choice(self.theme_choice, self.system_prefers_dark)
    }

    pub fn palette(&self) -> Palette {
        theme::resolve(self.theme_choice, self.system_prefers_dark)
    }

    fn first_window(&self) -> Window {
        paginate::window_for(self.listing.results.len(), self.listing.page)
    }

    fn emit_replaced<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let records = self.listing.results.slice(&self.catalog, self.first_window());
        renderer.on_results_replaced(&records, self.remaining(), self.is_empty());
    }
}
