//! Round-trip properties over generated containers

use crate::binder;
use proptest::prelude::*;
use sheetbind::{record, Axis, BindOptions, Tags};
use sheetbind_core::Workbook;

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Entry {
        name: String => Tags::new().column_name("Name"),
        count: i64,
        ratio: f64 => Tags::new().column_index(4),
        enabled: bool,
        note: Option<String>,
    }
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    (
        "[a-zA-Z0-9 ]{0,12}",
        -1_000_000_000i64..=1_000_000_000,
        -1.0e9f64..1.0e9,
        any::<bool>(),
        prop::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(name, count, ratio, enabled, note)| Entry {
            name,
            count,
            ratio,
            enabled,
            note,
        })
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Memo {
        title: String,
        body: Option<String> => Tags::new().column_index(1),
    }
}

/// Memos that are often entirely blank
fn arb_memo() -> impl Strategy<Value = Memo> {
    (
        prop_oneof![Just(String::new()), "[a-z]{1,8}"],
        prop::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(title, body)| Memo { title, body })
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    (0u32..20, 0u16..10, any::<bool>()).prop_map(|(row, col, by_column)| {
        if by_column {
            Axis::columns(row, col)
        } else {
            Axis::rows(row, col)
        }
    })
}

proptest! {
    #[test]
    fn records_round_trip(entries in prop::collection::vec(arb_entry(), 0..12), axis in arb_axis()) {
        let mut workbook = Workbook::new();
        let mut binder = binder(&mut workbook).with_axis(axis);
        binder.marshal(&entries).unwrap();

        let mut read: Vec<Entry> = Vec::new();
        binder.unmarshal(&mut read).unwrap();
        prop_assert_eq!(read, entries);
    }

    #[test]
    fn blank_records_round_trip(
        memos in prop::collection::vec(arb_memo(), 0..12),
        axis in arb_axis(),
        has_header in any::<bool>(),
    ) {
        let mut workbook = Workbook::new();
        let mut binder = binder(&mut workbook)
            .with_axis(axis)
            .with_options(BindOptions::new().has_header(has_header));
        binder.marshal(&memos).unwrap();

        let mut read: Vec<Memo> = Vec::new();
        binder.unmarshal(&mut read).unwrap();
        prop_assert_eq!(read, memos);
    }

    #[test]
    fn sequences_round_trip(
        lines in (1usize..5).prop_flat_map(|width| {
            prop::collection::vec(prop::collection::vec(-1000i64..1000, width), 1..10)
        })
    ) {
        let mut workbook = Workbook::new();
        let mut binder = binder(&mut workbook);
        binder.marshal(&lines).unwrap();

        let mut read: Vec<Vec<i64>> = Vec::new();
        binder.unmarshal(&mut read).unwrap();
        prop_assert_eq!(read, lines);
    }
}
