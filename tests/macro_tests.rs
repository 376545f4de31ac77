use chrono::NaiveDate;
use pdtable::{table, ColumnType, Error, Table};

#[test]
fn test_macro_matches_builder() {
    let built = table!("farm" ["your_farm", "my_farm"] {
        "species": ["chicken", "cow"],
        "legs": [2i64, 4],
        "mass" ("kg"): [3.0, 200.0],
        "alive": [true, false],
    })
    .unwrap();

    let mut expected = Table::new("farm")
        .unwrap()
        .with_destinations(["your_farm", "my_farm"]);
    expected.add_column("species", vec!["chicken", "cow"], None).unwrap();
    expected.add_column("legs", vec![2i64, 4], None).unwrap();
    expected.add_column("mass", vec![3.0, 200.0], Some("kg")).unwrap();
    expected.add_column("alive", vec![true, false], None).unwrap();

    assert_eq!(built, expected);
}

#[test]
fn test_macro_column_types() {
    let day = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
    let table = table!("t" {
        "d": [day],
        "m": [Some(1.0)],
        "n" ("pcs"): [7i64],
    })
    .unwrap();
    assert_eq!(table.column("d").unwrap().column_type(), ColumnType::Date);
    assert_eq!(table.column("m").unwrap().column_type(), ColumnType::Float);
    assert_eq!(table.column("n").unwrap().unit(), "pcs");
}

#[test]
fn test_macro_defaults_to_all_destination() {
    let table = table!("t" { "x": [1i64] }).unwrap();
    assert!(table.destinations().contains("all"));
}

#[test]
fn test_macro_reports_row_count_mismatch() {
    let result = table!("t" {
        "a": [1i64, 2],
        "b": [1i64],
    });
    assert!(matches!(result, Err(Error::RowCountMismatch { .. })));
}

#[test]
fn test_macro_rejects_unit_on_text() {
    let result = table!("t" { "a" ("kg"): ["x"] });
    assert!(matches!(result, Err(Error::InvalidUnit { .. })));
}

#[test]
fn test_macro_rejects_empty_name() {
    let result = table!("" { "a": [1i64] });
    assert!(matches!(result, Err(Error::InvalidTableName(_))));
}
