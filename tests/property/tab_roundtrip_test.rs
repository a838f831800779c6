//! Property-based tests for saved-tab persistence.
//!
//! For any generated tab, storing and listing must preserve every field,
//! and replaying the same create must never duplicate or overwrite.

use proptest::prelude::*;
use tabvault::database::Database;
use tabvault::managers::tab_manager::{TabManager, TabManagerTrait};
use tabvault::types::tab::Tab;

fn arb_text() -> impl Strategy<Value = String> {
    // Printable text including quotes and unicode, to exercise SQL binding
    "[a-zA-Z0-9 '\"\u{e9}\u{4e16}]{0,40}"
}

fn arb_tab() -> impl Strategy<Value = Tab> {
    (
        "[a-f0-9]{32}",
        arb_text(),
        arb_text(),
        prop::option::of("[a-f0-9]{8}"),
        prop::option::of(arb_text()),
        prop::option::of("#[0-9a-f]{6}"),
        1_000_000_000_000i64..2_000_000_000_000i64,
    )
        .prop_map(|(id, url, title, session_id, fav_icon_url, colour, saved_at)| Tab {
            id,
            library_id: "lib-1".to_string(),
            session_id,
            url,
            title,
            fav_icon_url,
            saved_at,
            notes: String::new(),
            colour,
            session_name: None,
            library_name: None,
            source_browser: None,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every field written is read back unchanged.
    #[test]
    fn stored_tab_round_trips(tab in arb_tab()) {
        let db = Database::open_in_memory().expect("open failed");
        let mut mgr = TabManager::new(db.connection());

        mgr.create_tab(&tab).unwrap();
        let listed = mgr.list_tabs("lib-1").unwrap();

        prop_assert_eq!(listed.len(), 1);
        let got = &listed[0];
        prop_assert_eq!(&got.id, &tab.id);
        prop_assert_eq!(&got.url, &tab.url);
        prop_assert_eq!(&got.title, &tab.title);
        prop_assert_eq!(&got.session_id, &tab.session_id);
        prop_assert_eq!(&got.fav_icon_url, &tab.fav_icon_url);
        prop_assert_eq!(&got.colour, &tab.colour);
        prop_assert_eq!(got.saved_at, tab.saved_at);
    }

    /// Replaying a create with the same id is idempotent: one row, first
    /// write wins.
    #[test]
    fn replayed_create_is_idempotent(tab in arb_tab(), other_url in arb_text()) {
        let db = Database::open_in_memory().expect("open failed");
        let mut mgr = TabManager::new(db.connection());

        mgr.create_tab(&tab).unwrap();

        let mut replay = tab.clone();
        replay.url = other_url;
        mgr.create_tab(&replay).unwrap();

        let listed = mgr.list_tabs("lib-1").unwrap();
        prop_assert_eq!(listed.len(), 1);
        prop_assert_eq!(&listed[0].url, &tab.url);
    }
}
