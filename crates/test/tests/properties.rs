//! Property tests for filtering and pagination invariants.

use bookconnect_application::{PageState, filter, paginate};
use bookconnect_core::{BookRecord, Catalog, Criteria, KeyFilter, PageSize};
use bookconnect_test::{AUTHOR_KEYS, GENRE_KEYS, RecordingRenderer, book, catalog_of, session_over};
use proptest::prelude::*;

fn arb_key_filter(keys: &'static [&'static str]) -> impl Strategy<Value = KeyFilter> {
    prop_oneof![
        Just(KeyFilter::Any),
        prop::sample::select(keys.to_vec()).prop_map(|key| KeyFilter::key(key)),
        Just(KeyFilter::key("missing-key")),
    ]
}

fn arb_criteria() -> impl Strategy<Value = Criteria> {
    (
        prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-dA-D ]{1,3}"],
        arb_key_filter(&AUTHOR_KEYS),
        arb_key_filter(&GENRE_KEYS),
    )
        .prop_map(|(title, author, genre)| Criteria {
            title,
            author,
            genre,
        })
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(
        (
            "[a-dA-D ]{0,8}",
            prop::sample::select(AUTHOR_KEYS.to_vec()),
            prop::sample::subsequence(GENRE_KEYS.to_vec(), 0..=GENRE_KEYS.len()),
        ),
        0..20,
    )
    .prop_map(|rows| {
        let books: Vec<BookRecord> = rows
            .iter()
            .enumerate()
            .map(|(i, (title, author, genres))| book(&format!("p{i}"), title, author, genres))
            .collect();
        catalog_of(books)
    })
}

fn satisfies(book: &BookRecord, criteria: &Criteria) -> bool {
    let title_ok = criteria.title.trim().is_empty()
        || book
            .title
            .to_lowercase()
            .contains(&criteria.title.to_lowercase());
    title_ok && criteria.author.matches(&book.author) && criteria.genre.matches_any_of(&book.genres)
}

proptest! {
    #[test]
    fn unfiltered_criteria_return_full_catalog(catalog in arb_catalog()) {
        let results = filter::filter(&catalog, &Criteria::default());
        let expected: Vec<usize> = (0..catalog.len()).collect();
        prop_assert_eq!(results.positions(), expected.as_slice());
    }

    #[test]
    fn results_partition_catalog_by_predicates(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
    ) {
        let results = filter::filter(&catalog, &criteria);
        for (pos, book) in catalog.books().iter().enumerate() {
            let included = results.positions().contains(&pos);
            prop_assert_eq!(included, satisfies(book, &criteria));
        }
        prop_assert!(results.positions().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn filtering_is_idempotent(catalog in arb_catalog(), criteria in arb_criteria()) {
        prop_assert_eq!(
            filter::filter(&catalog, &criteria),
            filter::filter(&catalog, &criteria)
        );
    }

    #[test]
    fn remaining_matches_formula(len in 0usize..500, size in 1i64..50, page in 1usize..40) {
        let state = PageState::at(PageSize::new(size).unwrap(), page);
        let shown = page * size as usize;
        let expected = len.saturating_sub(shown);
        prop_assert_eq!(paginate::remaining(len, state), expected);
        prop_assert_eq!(paginate::is_exhausted(len, state), expected == 0);

        let window = paginate::window_for(len, state);
        prop_assert!(window.start <= window.end && window.end <= len);
        prop_assert!(window.len() <= size as usize);
    }

    #[test]
    fn submit_filter_always_resets_page(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
        advances in 0usize..5,
    ) {
        let mut session = session_over(catalog, 2);
        let mut renderer = RecordingRenderer::default();
        for _ in 0..advances {
            session.advance_page(&mut renderer);
        }
        session.submit_filter(criteria, &mut renderer);
        prop_assert_eq!(session.page_state().page_number(), 1);
        prop_assert_eq!(session.is_exhausted(), session.remaining() == 0);
    }

    #[test]
    fn exhausted_advance_is_a_no_op(catalog in arb_catalog(), size in 1i64..6) {
        let mut session = session_over(catalog, size);
        let mut renderer = RecordingRenderer::default();
        while session.advance_page(&mut renderer) {}

        let page = session.page_state();
        let emitted = renderer.emitted.len();
        prop_assert!(!session.advance_page(&mut renderer));
        prop_assert_eq!(session.page_state(), page);
        prop_assert_eq!(renderer.emitted.len(), emitted);
        prop_assert_eq!(session.visible().len(), session.results().len());
    }
}
