#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_export_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let expenses = vec![
        Expense::new(
            "Petrol".into(),
            dec!(1200),
            Some("Fuel".into()),
            date(2024, 1, 15),
            Some("Self".into()),
        ),
        Expense::new(
            "Dinner Out".into(),
            dec!(900.50),
            Some("Dining Out".into()),
            date(2024, 1, 20),
            Some("Family".into()),
        ),
    ];

    let n = export_to_csv(&path, &expenses).unwrap();
    assert_eq!(n, 2);

    let lines = read_lines(&path);
    assert_eq!(lines[0], "Title,Amount,Category,Date,Person");
    assert_eq!(lines[1], "Petrol,1200,Fuel,2024-01-15,Self");
    assert_eq!(lines[2], "Dinner Out,900.50,Dining Out,2024-01-20,Family");
}

#[test]
fn test_export_replaces_commas_with_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let expenses = vec![Expense::new(
        "Milk, eggs, bread".into(),
        dec!(650),
        Some("Groceries".into()),
        date(2024, 1, 10),
        Some("Mom, Dad".into()),
    )];

    export_to_csv(&path, &expenses).unwrap();
    let lines = read_lines(&path);
    assert_eq!(lines[1], "Milk  eggs  bread,650,Groceries,2024-01-10,Mom  Dad");
}

#[test]
fn test_export_missing_fields_as_blank() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let expenses = vec![Expense::new(
        "Misc".into(),
        dec!(10),
        None,
        date(2024, 1, 1),
        None,
    )];

    export_to_csv(&path, &expenses).unwrap();
    let lines = read_lines(&path);
    assert_eq!(lines[1], "Misc,10,,2024-01-01,");
}

#[test]
fn test_export_empty_list_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let n = export_to_csv(&path, &[]).unwrap();
    assert_eq!(n, 0);

    let lines = read_lines(&path);
    assert_eq!(lines, vec!["Title,Amount,Category,Date,Person".to_string()]);
}

#[test]
fn test_export_unwritable_path_errors() {
    let path = std::path::Path::new("/definitely/not/a/real/dir/out.csv");
    assert!(export_to_csv(path, &[]).is_err());
}
