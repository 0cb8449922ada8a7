//! Records: structs declared with `record!`.

use crate::{binder, cell_text, cells, row_text, workbook_with};
use pretty_assertions::assert_eq;
use sheetbind::{record, Axis, BindError, BindOptions, TagMap, Tags};
use sheetbind_core::{CellValue, Workbook};

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Person {
        pub name: String => Tags::new().column_name("Name"),
        pub age: i64 => Tags::new().column_index(2),
        pub active: bool => Tags::new().column_name("Active"),
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Point {
        pub x: f64,
        pub y: f64,
        pub label: Option<String>,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Account {
        login: String,
        secret: String => Tags::new().skip(),
        score: i64 => Tags::new().default_value(10),
    }
}

fn people_sheet() -> Workbook {
    workbook_with(&[
        cells!["Name", "Age", "Active"],
        cells!["Ada", 36, true],
        cells!["Linus", 28, false],
    ])
}

fn ada() -> Person {
    Person {
        name: "Ada".into(),
        age: 36,
        active: true,
    }
}

fn linus() -> Person {
    Person {
        name: "Linus".into(),
        age: 28,
        active: false,
    }
}

#[test]
fn test_unmarshal_people() {
    let mut workbook = people_sheet();
    let mut binder = binder(&mut workbook);

    let mut people: Vec<Person> = Vec::new();
    binder.unmarshal(&mut people).unwrap();

    assert_eq!(people, vec![ada(), linus()]);

    let report = binder.report().expect("report after success");
    assert_eq!(report.rows, 2);
    assert_eq!(report.header(), vec!["Name", "Age", "Active"]);
    assert_eq!(report.column("age").map(|c| c.position), Some(1));
}

#[test]
fn test_marshal_people_round_trip() {
    let mut workbook = Workbook::new();
    let people = vec![ada(), linus()];
    {
        let mut binder = binder(&mut workbook);
        binder.marshal(&people).unwrap();
        assert_eq!(binder.report().map(|r| r.rows), Some(2));
    }

    assert_eq!(row_text(&workbook, 0, 3), vec!["Name", "age", "Active"]);
    assert_eq!(row_text(&workbook, 1, 3), vec!["Ada", "36", "TRUE"]);
    assert_eq!(row_text(&workbook, 2, 3), vec!["Linus", "28", "FALSE"]);

    let mut read: Vec<Person> = Vec::new();
    binder(&mut workbook).unmarshal(&mut read).unwrap();
    assert_eq!(read, people);
}

#[test]
fn test_marshal_reuses_existing_header() {
    let mut workbook = workbook_with(&[cells!["Active", "Age", "Name"]]);
    let people = vec![ada()];
    binder(&mut workbook).marshal(&people).unwrap();

    assert_eq!(row_text(&workbook, 0, 3), vec!["Active", "Age", "Name"]);
    assert_eq!(row_text(&workbook, 1, 3), vec!["TRUE", "36", "Ada"]);

    let mut read: Vec<Person> = Vec::new();
    binder(&mut workbook).unmarshal(&mut read).unwrap();
    assert_eq!(read, people);
}

#[test]
fn test_marshal_twice_writes_same_region() {
    let mut workbook = Workbook::new();
    let people = vec![ada()];
    {
        let mut binder = binder(&mut workbook);
        binder.marshal(&people).unwrap();
        binder.marshal(&people).unwrap();
    }
    assert_eq!(workbook.worksheet(0).unwrap().row_count(), 2);
    assert_eq!(row_text(&workbook, 1, 3), vec!["Ada", "36", "TRUE"]);
}

#[test]
fn test_column_name_beats_column_index() {
    record! {
        #[derive(Debug, Default, PartialEq)]
        struct Pick {
            value: String,
        }
    }

    let mut tags = TagMap::new();
    tags.insert("value".into(), Tags::new().column_name("B").column_index(3));

    let mut workbook = workbook_with(&[cells!["A", "B", "C"], cells!["a", "b", "c"]]);
    let mut picked: Vec<Pick> = Vec::new();
    binder(&mut workbook)
        .unmarshal_with_tags(&mut picked, &tags)
        .unwrap();
    assert_eq!(picked, vec![Pick { value: "b".into() }]);

    // Without a "B" label the index applies
    let mut workbook = workbook_with(&[cells!["A", "X", "C"], cells!["a", "b", "c"]]);
    let mut picked: Vec<Pick> = Vec::new();
    binder(&mut workbook)
        .unmarshal_with_tags(&mut picked, &tags)
        .unwrap();
    assert_eq!(picked, vec![Pick { value: "c".into() }]);
}

#[test]
fn test_overrides_replace_declared_tags() {
    let mut tags = TagMap::new();
    tags.insert("age".into(), Tags::new().column_name("Years"));

    let mut workbook = workbook_with(&[
        cells!["Name", "Active", "Years"],
        cells!["Ada", true, 36],
    ]);
    let mut people: Vec<Person> = Vec::new();
    binder(&mut workbook)
        .unmarshal_with_tags(&mut people, &tags)
        .unwrap();
    assert_eq!(people, vec![ada()]);
}

#[test]
fn test_skipped_field_is_never_bound() {
    let mut workbook = workbook_with(&[
        cells!["login", "secret", "score"],
        cells!["ada", "hunter2", 3],
    ]);
    let mut accounts: Vec<Account> = Vec::new();
    binder(&mut workbook).unmarshal(&mut accounts).unwrap();
    assert_eq!(
        accounts,
        vec![Account {
            login: "ada".into(),
            secret: String::new(),
            score: 3,
        }]
    );

    let mut workbook = Workbook::new();
    let accounts = vec![Account {
        login: "bob".into(),
        secret: "swordfish".into(),
        score: 1,
    }];
    binder(&mut workbook).marshal(&accounts).unwrap();
    assert_eq!(row_text(&workbook, 0, 3), vec!["login", "score", ""]);
    assert_eq!(row_text(&workbook, 1, 3), vec!["bob", "1", ""]);
}

#[test]
fn test_default_tag_fills_empty_cells() {
    let mut workbook = workbook_with(&[
        cells!["login", "score"],
        cells!["ada", CellValue::Empty],
        cells!["bob", ""],
    ]);
    let mut accounts: Vec<Account> = Vec::new();
    binder(&mut workbook).unmarshal(&mut accounts).unwrap();
    assert_eq!(
        accounts.iter().map(|a| a.score).collect::<Vec<_>>(),
        vec![10, 10]
    );
}

#[test]
fn test_required_field_leaves_container_unmodified() {
    let mut tags = TagMap::new();
    tags.insert("name".into(), Tags::new().column_name("Name").required());

    let mut workbook = workbook_with(&[
        cells!["Name", "Age", "Active"],
        cells!["Ada", 36, true],
        cells!["", 28, false],
    ]);
    let mut binder = binder(&mut workbook);

    let mut people = vec![linus()];
    let err = binder.unmarshal_with_tags(&mut people, &tags).unwrap_err();

    match err {
        BindError::RequiredFieldEmpty { cell, row, field } => {
            assert_eq!(cell, "A3");
            assert_eq!(row, 3);
            assert_eq!(field, "name");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(people, vec![linus()]);
    assert!(binder.report().is_none());
}

#[test]
fn test_required_field_without_column() {
    let mut tags = TagMap::new();
    tags.insert("active".into(), Tags::new().column_name("Active").required());

    let mut workbook = workbook_with(&[cells!["Name", "Age"], cells!["Ada", 36]]);
    let mut people: Vec<Person> = Vec::new();
    let err = binder(&mut workbook)
        .unmarshal_with_tags(&mut people, &tags)
        .unwrap_err();
    assert!(matches!(err, BindError::MissingColumn { field } if field == "active"));
}

#[test]
fn test_conversion_error_names_the_cell() {
    let mut workbook = workbook_with(&[
        cells!["Name", "Age", "Active"],
        cells!["Ada", "thirty-six", true],
    ]);
    let mut people: Vec<Person> = Vec::new();
    let err = binder(&mut workbook).unmarshal(&mut people).unwrap_err();

    match &err {
        BindError::Conversion {
            cell,
            row,
            field,
            expected,
            found,
            ..
        } => {
            assert_eq!(cell, "B2");
            assert_eq!(*row, 2);
            assert_eq!(field, "age");
            assert_eq!(*expected, "i64");
            assert_eq!(*found, "string");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("B2"));
    assert!(people.is_empty());
}

#[test]
fn test_conversion_error_on_marshal_writes_nothing() {
    record! {
        #[derive(Debug, Default)]
        struct Counter {
            hits: u64,
        }
    }

    let mut workbook = Workbook::new();
    let counters = vec![Counter { hits: 1 }, Counter { hits: u64::MAX }];
    let err = binder(&mut workbook).marshal(&counters).unwrap_err();

    assert!(matches!(err, BindError::Conversion { ref cell, .. } if cell == "A3"));
    assert!(workbook.worksheet(0).unwrap().is_empty());
}

#[test]
fn test_blank_lines() {
    let rows = [
        cells!["Name", "Age", "Active"],
        cells!["Ada", 36, true],
        cells![],
        cells!["Linus", 28, false],
    ];

    // Every line inside the region is an element
    let mut workbook = workbook_with(&rows);
    let mut people: Vec<Person> = Vec::new();
    binder(&mut workbook).unmarshal(&mut people).unwrap();
    assert_eq!(people, vec![ada(), Person::default(), linus()]);

    let mut workbook = workbook_with(&rows);
    let mut people: Vec<Person> = Vec::new();
    let mut binder = binder(&mut workbook);
    binder.set_options(BindOptions::new().skip_blank_lines(true));
    binder.unmarshal(&mut people).unwrap();
    assert_eq!(people, vec![ada(), linus()]);
    assert_eq!(binder.report().map(|r| r.rows), Some(2));
}

#[test]
fn test_blank_element_round_trip() {
    record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Note {
            title: String,
            body: Option<String>,
        }
    }

    let notes = vec![
        Note { title: "x".into(), body: None },
        Note::default(),
        Note { title: "y".into(), body: Some("z".into()) },
    ];

    let mut workbook = Workbook::new();
    binder(&mut workbook).marshal(&notes).unwrap();

    let mut read: Vec<Note> = Vec::new();
    binder(&mut workbook).unmarshal(&mut read).unwrap();
    assert_eq!(read, notes);
}

#[test]
fn test_without_header_mixes_index_and_order() {
    record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Pair {
            a: String,
            b: i64 => Tags::new().column_index(1),
            c: bool,
        }
    }

    let pairs = vec![
        Pair { a: "hello".into(), b: 5, c: true },
        Pair { a: "world".into(), b: 6, c: false },
    ];
    let options = BindOptions::new().has_header(false);

    let mut workbook = Workbook::new();
    binder(&mut workbook)
        .with_options(options.clone())
        .marshal(&pairs)
        .unwrap();
    assert_eq!(row_text(&workbook, 0, 3), vec!["5", "hello", "TRUE"]);

    let mut read: Vec<Pair> = Vec::new();
    let mut binder = binder(&mut workbook).with_options(options);
    binder.unmarshal(&mut read).unwrap();
    assert_eq!(read, pairs);

    let report = binder.report().unwrap();
    let layout: Vec<_> = report
        .columns
        .iter()
        .map(|c| (c.field.as_str(), c.position))
        .collect();
    assert_eq!(layout, vec![("b", 0), ("a", 1), ("c", 2)]);
}

#[test]
fn test_without_header_index_conflict() {
    record! {
        #[derive(Debug, Default)]
        struct Clash {
            a: i64 => Tags::new().column_index(2),
            b: i64 => Tags::new().column_index(2),
        }
    }

    let mut workbook = workbook_with(&[cells![1, 2]]);
    let mut read: Vec<Clash> = Vec::new();
    let err = binder(&mut workbook)
        .with_options(BindOptions::new().has_header(false))
        .unmarshal(&mut read)
        .unwrap_err();
    assert!(matches!(err, BindError::ConfigNotValid(_)));
}

#[test]
fn test_without_header() {
    let mut workbook = workbook_with(&[
        cells![1.5, 2.0, "p"],
        cells![3.0, 4.0, CellValue::Empty],
    ]);
    let mut points: Vec<Point> = Vec::new();
    {
        let mut binder = binder(&mut workbook);
        binder.set_options(BindOptions::new().has_header(false));
        binder.unmarshal(&mut points).unwrap();
        assert_eq!(binder.report().unwrap().header(), vec!["", "", ""]);
    }

    assert_eq!(
        points,
        vec![
            Point { x: 1.5, y: 2.0, label: Some("p".into()) },
            Point { x: 3.0, y: 4.0, label: None },
        ]
    );

    let mut workbook = Workbook::new();
    let mut binder = binder(&mut workbook).with_options(BindOptions::new().has_header(false));
    binder.marshal(&points).unwrap();
    drop(binder);
    assert_eq!(row_text(&workbook, 0, 3), vec!["1.5", "2", "p"]);
    assert_eq!(row_text(&workbook, 1, 3), vec!["3", "4", ""]);
}

#[test]
fn test_column_axis() {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.worksheet_mut(0).unwrap();
        for (addr, value) in [
            ("B2", CellValue::from("Name")),
            ("B3", CellValue::from("Age")),
            ("B4", CellValue::from("Active")),
            ("C2", CellValue::from("Ada")),
            ("C3", CellValue::from(36)),
            ("C4", CellValue::from(true)),
            ("D2", CellValue::from("Linus")),
            ("D3", CellValue::from(28)),
            ("D4", CellValue::from(false)),
        ] {
            sheet.set_cell_value(addr, value).unwrap();
        }
    }

    let mut people: Vec<Person> = Vec::new();
    {
        let mut binder = binder(&mut workbook);
        binder.set_axis(Axis::parse_columns("B2").unwrap());
        binder.unmarshal(&mut people).unwrap();
    }
    assert_eq!(people, vec![ada(), linus()]);

    let mut workbook = Workbook::new();
    {
        let mut binder = binder(&mut workbook).with_axis(Axis::parse_columns("B2").unwrap());
        binder.marshal(&people).unwrap();
    }
    assert_eq!(cell_text(&workbook, "B2"), "Name");
    assert_eq!(cell_text(&workbook, "B3"), "age");
    assert_eq!(cell_text(&workbook, "C3"), "36");
    assert_eq!(cell_text(&workbook, "D2"), "Linus");
    assert_eq!(cell_text(&workbook, "D4"), "FALSE");
}

#[test]
fn test_offset_row_axis() {
    let mut workbook = Workbook::new();
    let people = vec![ada()];
    {
        let mut binder = binder(&mut workbook).with_axis(Axis::parse("C5").unwrap());
        binder.marshal(&people).unwrap();
    }
    assert_eq!(cell_text(&workbook, "C5"), "Name");
    assert_eq!(cell_text(&workbook, "E6"), "TRUE");

    let mut read: Vec<Person> = Vec::new();
    let mut binder = binder(&mut workbook).with_axis(Axis::parse("C5").unwrap());
    binder.unmarshal(&mut read).unwrap();
    assert_eq!(read, people);
}

#[test]
fn test_boxed_records() {
    let mut workbook = people_sheet();
    let mut people: Vec<Box<Person>> = Vec::new();
    binder(&mut workbook).unmarshal(&mut people).unwrap();
    assert_eq!(people, vec![Box::new(ada()), Box::new(linus())]);
}

#[cfg(feature = "serde")]
#[test]
fn test_nested_record_as_json() {
    use serde::{Deserialize, Serialize};
    use sheetbind::Json;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Address {
        city: String,
        zip: String,
    }

    record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Customer {
            name: String,
            address: Json<Address>,
        }
    }

    let customers = vec![Customer {
        name: "Ada".into(),
        address: Json(Address {
            city: "London".into(),
            zip: "N1".into(),
        }),
    }];

    let mut workbook = Workbook::new();
    binder(&mut workbook).marshal(&customers).unwrap();
    assert_eq!(cell_text(&workbook, "B2"), r#"{"city":"London","zip":"N1"}"#);

    let mut read: Vec<Customer> = Vec::new();
    binder(&mut workbook).unmarshal(&mut read).unwrap();
    assert_eq!(read, customers);
}
