//! Day/night palette selection.

use bookconnect_core::{Palette, ThemeChoice};

/// An explicit choice wins; otherwise a dark system preference selects night.
pub fn effective_choice(
    explicit: Option<ThemeChoice>,
    system_prefers_dark: Option<bool>,
) -> ThemeChoice {
    match (explicit, system_prefers_dark) {
        (Some(choice), _) => choice,
        (None, Some(true)) => ThemeChoice::Night,
        (None, _) => ThemeChoice::Day,
    }
}

pub fn resolve(explicit: Option<ThemeChoice>, system_prefers_dark: Option<bool>) -> Palette {
    effective_choice(explicit, system_prefers_dark).palette()
}
