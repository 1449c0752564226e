//! Active-record lookup.

use bookconnect_core::{BookRecord, Catalog};

/// Exact id lookup. `None` is an ordinary outcome, not a fault.
pub fn resolve<'a>(catalog: &'a Catalog, id: &str) -> Option<&'a BookRecord> {
    catalog.position_of(id).and_then(|pos| catalog.get(pos))
}
