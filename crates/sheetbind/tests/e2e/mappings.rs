//! Mappings: header labels become keys

use std::collections::{BTreeMap, HashMap};

use crate::{binder, cells, row_text, workbook_with};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use sheetbind::{BindError, BindOptions, Shape, TagMap, Tags};
use sheetbind_core::{CellValue, Workbook};

type Row = IndexMap<String, i64>;

fn row(pairs: &[(&str, i64)]) -> Row {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_marshal_key_union() {
    let mut workbook = Workbook::new();
    let rows = vec![row(&[("a", 1), ("b", 2)]), row(&[("b", 3), ("c", 4)])];
    {
        let mut binder = binder(&mut workbook);
        binder.marshal(&rows).unwrap();
        let report = binder.report().unwrap();
        assert_eq!(report.shape, Shape::Mapping);
        assert_eq!(report.header(), vec!["a", "b", "c"]);
    }

    assert_eq!(row_text(&workbook, 0, 3), vec!["a", "b", "c"]);
    assert_eq!(row_text(&workbook, 1, 3), vec!["1", "2", ""]);
    assert_eq!(row_text(&workbook, 2, 3), vec!["", "3", "4"]);

    // Blank cells read back as the value default
    let mut read: Vec<Row> = Vec::new();
    binder(&mut workbook).unmarshal(&mut read).unwrap();
    assert_eq!(
        read,
        vec![
            row(&[("a", 1), ("b", 2), ("c", 0)]),
            row(&[("a", 0), ("b", 3), ("c", 4)]),
        ]
    );
}

#[test]
fn test_unmarshal_into_maps() {
    let sheet = [
        cells!["City", "Country", "", "Population"],
        cells!["Oslo", "NO", "ignored", 709037],
        cells!["Lyon", "FR", CellValue::Empty, 522250],
    ];

    let mut workbook = workbook_with(&sheet);
    let mut ordered: Vec<IndexMap<String, String>> = Vec::new();
    binder(&mut workbook).unmarshal(&mut ordered).unwrap();
    assert_eq!(ordered.len(), 2);
    assert_eq!(
        ordered[0].keys().collect::<Vec<_>>(),
        vec!["City", "Country", "Population"]
    );
    assert_eq!(ordered[1]["Population"], "522250");

    let mut workbook = workbook_with(&sheet);
    let mut hashed: Vec<HashMap<String, String>> = Vec::new();
    binder(&mut workbook).unmarshal(&mut hashed).unwrap();
    assert_eq!(hashed[0]["City"], "Oslo");
    assert!(!hashed[0].contains_key(""));

    let mut workbook = workbook_with(&sheet);
    let mut sorted: Vec<BTreeMap<String, String>> = Vec::new();
    binder(&mut workbook).unmarshal(&mut sorted).unwrap();
    assert_eq!(sorted[1]["Country"], "FR");
}

#[test]
fn test_hash_map_keys_are_sorted_on_marshal() {
    let mut first: HashMap<String, i64> = HashMap::new();
    first.insert("zeta".into(), 1);
    first.insert("alpha".into(), 2);
    first.insert("mid".into(), 3);

    let mut workbook = Workbook::new();
    binder(&mut workbook).marshal(&vec![first]).unwrap();
    assert_eq!(row_text(&workbook, 0, 3), vec!["alpha", "mid", "zeta"]);
    assert_eq!(row_text(&workbook, 1, 3), vec!["2", "3", "1"]);
}

#[test]
fn test_strict_keys_reject_drift() {
    let mut workbook = Workbook::new();
    let rows = vec![row(&[("a", 1)]), row(&[("a", 2), ("z", 9)])];
    let err = binder(&mut workbook)
        .with_options(BindOptions::new().strict_keys(true))
        .marshal(&rows)
        .unwrap_err();

    assert!(matches!(err, BindError::UnknownMappingKey { ref key, element: 1 } if key == "z"));
    assert!(workbook.worksheet(0).unwrap().is_empty());

    // Lenient mode widens the header instead
    let mut workbook = Workbook::new();
    binder(&mut workbook).marshal(&rows).unwrap();
    assert_eq!(row_text(&workbook, 0, 2), vec!["a", "z"]);
}

#[test]
fn test_tags_relabel_pin_and_skip() {
    let mut tags = TagMap::new();
    tags.insert("total".into(), Tags::new().column_index(1).column_name("Total"));
    tags.insert("internal".into(), Tags::new().skip());

    let rows = vec![row(&[("qty", 2), ("internal", 99), ("total", 10)])];
    let mut workbook = Workbook::new();
    binder(&mut workbook)
        .marshal_with_tags(&rows, &tags)
        .unwrap();
    assert_eq!(row_text(&workbook, 0, 3), vec!["Total", "qty", ""]);
    assert_eq!(row_text(&workbook, 1, 3), vec!["10", "2", ""]);

    let mut read: Vec<Row> = Vec::new();
    binder(&mut workbook)
        .unmarshal_with_tags(&mut read, &tags)
        .unwrap();
    assert_eq!(read, vec![row(&[("total", 10), ("qty", 2)])]);
}

#[test]
fn test_required_key() {
    let mut tags = TagMap::new();
    tags.insert("id".into(), Tags::new().required());

    let mut workbook = workbook_with(&[cells!["id", "name"], cells![1, "a"], cells!["", "b"]]);
    let mut read: Vec<IndexMap<String, String>> = Vec::new();
    let err = binder(&mut workbook)
        .unmarshal_with_tags(&mut read, &tags)
        .unwrap_err();
    assert!(matches!(err, BindError::RequiredFieldEmpty { ref cell, .. } if cell == "A3"));
    assert!(read.is_empty());
}

#[test]
fn test_mappings_need_a_header() {
    let mut workbook = workbook_with(&[cells!["a"], cells![1]]);
    let mut binder = binder(&mut workbook).with_options(BindOptions::new().has_header(false));

    let mut read: Vec<Row> = Vec::new();
    assert!(matches!(
        binder.unmarshal(&mut read),
        Err(BindError::ConfigNotValid(_))
    ));
    assert!(matches!(
        binder.marshal(&vec![row(&[("a", 1)])]),
        Err(BindError::ConfigNotValid(_))
    ));
}
