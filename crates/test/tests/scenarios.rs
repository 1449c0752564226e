//! End-to-end browsing scenarios at page size 2.

use bookconnect_application::{filter, paginate};
use bookconnect_core::{Catalog, Criteria, CriteriaForm, KeyFilter, Palette, ThemeChoice};
use bookconnect_test::{
    Emitted, RecordingRenderer, book, catalog_of, numbered_catalog, scenario_catalog,
    session_over,
};

fn ids(catalog: &Catalog, criteria: &Criteria) -> Vec<String> {
    filter::filter(catalog, criteria)
        .records(catalog)
        .map(|b| b.id.to_string())
        .collect()
}

fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn genre_filter_keeps_catalog_order() {
    let catalog = scenario_catalog();
    let criteria = Criteria::from(CriteriaForm {
        title: String::new(),
        author: "any".to_string(),
        genre: "fiction".to_string(),
    });
    assert_eq!(ids(&catalog, &criteria), strings(&["A", "C"]));
}

#[test]
fn title_filter_is_case_insensitive() {
    let catalog = scenario_catalog();
    let criteria = Criteria::default().with_title("b");
    assert_eq!(ids(&catalog, &criteria), strings(&["B"]));
}

#[test]
fn five_results_paginate_to_exhaustion() {
    let mut session = session_over(numbered_catalog(5), 2);
    let mut renderer = RecordingRenderer::default();

    session.start(&mut renderer);
    assert_eq!(
        renderer.last(),
        Some(&Emitted::Replaced {
            ids: strings(&["b0", "b1"]),
            remaining: 3,
            is_empty: false,
        })
    );

    assert!(session.advance_page(&mut renderer));
    assert_eq!(
        renderer.last(),
        Some(&Emitted::Appended {
            ids: strings(&["b2", "b3"]),
            remaining: 1,
            is_exhausted: false,
        })
    );

    assert!(session.advance_page(&mut renderer));
    assert_eq!(
        renderer.last(),
        Some(&Emitted::Appended {
            ids: strings(&["b4"]),
            remaining: 0,
            is_exhausted: true,
        })
    );

    let before = renderer.emitted.len();
    let page = session.page_state();
    assert!(!session.advance_page(&mut renderer));
    assert_eq!(renderer.emitted.len(), before);
    assert_eq!(session.page_state(), page);
}

#[test]
fn empty_catalog_is_empty_and_exhausted() {
    let mut session = session_over(catalog_of(Vec::new()), 2);
    let mut renderer = RecordingRenderer::default();
    let criteria = Criteria::default().with_genre(KeyFilter::key("fiction"));
    session.submit_filter(criteria, &mut renderer);

    assert_eq!(
        renderer.emitted,
        vec![Emitted::Replaced {
            ids: Vec::new(),
            remaining: 0,
            is_empty: true,
        }]
    );
    assert!(session.is_exhausted());
    let window = paginate::window_for(session.results().len(), session.page_state());
    assert!(window.is_empty());
}

#[test]
fn unknown_id_keeps_active_selection() {
    let mut session = session_over(scenario_catalog(), 2);
    let mut renderer = RecordingRenderer::default();
    assert!(session.select_item("A", &mut renderer));
    assert!(!session.select_item("unknown-id", &mut renderer));

    assert_eq!(session.active().map(|b| b.id.as_str()), Some("A"));
    assert_eq!(renderer.emitted, vec![Emitted::Selection(Some("A".to_string()))]);
}

#[test]
fn explicit_night_overrides_light_system() {
    let mut session = session_over(scenario_catalog(), 2);
    let mut renderer = RecordingRenderer::default();
    session.set_theme_choice(ThemeChoice::Night, &mut renderer);
    assert_eq!(renderer.last(), Some(&Emitted::Theme(Palette::NIGHT)));
    assert_eq!(
        bookconnect_application::theme::resolve(Some(ThemeChoice::Night), Some(false)),
        Palette::NIGHT
    );
}

#[test]
fn refilter_after_paging_starts_from_first_page() {
    let catalog = catalog_of(vec![
        book("x1", "Alpha", "author-1", &["poetry"]),
        book("x2", "Beta", "author-2", &["poetry"]),
        book("x3", "Gamma", "author-1", &["poetry"]),
        book("x4", "Delta", "author-1", &["scifi"]),
    ]);
    let mut session = session_over(catalog, 2);
    let mut renderer = RecordingRenderer::default();
    session.advance_page(&mut renderer);
    assert_eq!(session.page_state().page_number(), 2);

    let criteria = Criteria::default().with_author(KeyFilter::key("author-1"));
    session.submit_filter(criteria, &mut renderer);
    assert_eq!(session.page_state().page_number(), 1);
    assert_eq!(
        renderer.last(),
        Some(&Emitted::Replaced {
            ids: strings(&["x1", "x3"]),
            remaining: 1,
            is_empty: false,
        })
    );
}
