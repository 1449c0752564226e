//! Paint state fed by the catalog session.

use std::sync::Arc;

use bookconnect_application::{BookDetail, BookPreview, Renderer, paginate};
use bookconnect_core::{BookRecord, Catalog, Palette};
use ratatui::style::{Color, Style};

/// Everything the list pane, footer and detail overlay draw from.
///
/// Only the session writes here, through [`Renderer`]. Whether more results
/// can be revealed is read from the session, not stored.
#[derive(Debug, Clone)]
pub struct ListView {
    catalog: Arc<Catalog>,
    pub rows: Vec<BookPreview>,
    pub remaining: usize,
    pub empty: bool,
    pub detail: Option<BookDetail>,
    pub palette: Palette,
}

impl ListView {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            rows: Vec::new(),
            remaining: 0,
            empty: true,
            detail: None,
            palette: Palette::DAY,
        }
    }

    pub fn show_more_label(&self) -> String {
        paginate::show_more_label(self.remaining)
    }

    pub fn base_style(&self) -> Style {
        Style::default()
            .fg(to_color(self.palette.dark))
            .bg(to_color(self.palette.light))
    }

    pub fn accent_style(&self) -> Style {
        Style::default()
            .fg(to_color(self.palette.light))
            .bg(to_color(self.palette.dark))
    }

    fn previews(&self, records: &[&BookRecord]) -> Vec<BookPreview> {
        records
            .iter()
            .map(|record| BookPreview::new(record, &self.catalog))
            .collect()
    }
}

impl Renderer for ListView {
    fn on_results_replaced(&mut self, visible: &[&BookRecord], remaining: usize, is_empty: bool) {
        self.rows = self.previews(visible);
        self.remaining = remaining;
        self.empty = is_empty;
    }

    fn on_results_appended(&mut self, delta: &[&BookRecord], remaining: usize, _is_exhausted: bool) {
        let appended = self.previews(delta);
        self.rows.extend(appended);
        self.remaining = remaining;
    }

    fn on_selection_changed(&mut self, record: Option<&BookRecord>) {
        self.detail = record.map(|record| BookDetail::new(record, &self.catalog));
    }

    fn on_theme_resolved(&mut self, palette: Palette) {
        self.palette = palette;
    }
}

fn to_color(rgb: bookconnect_core::Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
