#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(title: &str, amount: Decimal, category: &str, d: NaiveDate, person: &str) -> Expense {
    Expense {
        id: None,
        title: title.into(),
        amount,
        category: (!category.is_empty()).then(|| category.to_string()),
        date: d,
        person: (!person.is_empty()).then(|| person.to_string()),
    }
}

// ── Expense CRUD ──────────────────────────────────────────────

#[test]
fn test_insert_and_fetch_expense() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&expense("Petrol", dec!(1200), "Fuel", date(2024, 1, 15), "Self"))
        .unwrap();

    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.id, Some(id));
    assert_eq!(fetched.title, "Petrol");
    assert_eq!(fetched.amount, dec!(1200));
    assert_eq!(fetched.category.as_deref(), Some("Fuel"));
    assert_eq!(fetched.date, date(2024, 1, 15));
    assert_eq!(fetched.person.as_deref(), Some("Self"));
}

#[test]
fn test_get_expense_by_id_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_expense_by_id(99999).unwrap().is_none());
}

#[test]
fn test_expenses_ordered_date_desc_id_desc() {
    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&expense("a", dec!(1), "", date(2024, 1, 10), ""))
        .unwrap();
    db.insert_expense(&expense("b", dec!(2), "", date(2024, 1, 20), ""))
        .unwrap();
    db.insert_expense(&expense("c", dec!(3), "", date(2024, 1, 20), ""))
        .unwrap();

    let all = db.get_expenses().unwrap();
    let titles: Vec<&str> = all.iter().map(|e| e.title.as_str()).collect();
    // Same date: the later insert (higher id) comes first.
    assert_eq!(titles, vec!["c", "b", "a"]);
}

#[test]
fn test_upsert_without_id_inserts() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .upsert_expense(&expense("Coffee", dec!(120), "Dining Out", date(2024, 1, 5), ""))
        .unwrap();
    assert!(db.get_expense_by_id(id).unwrap().is_some());
    assert_eq!(db.expense_count().unwrap(), 1);
}

#[test]
fn test_upsert_with_id_replaces_whole_row() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&expense("Coffee", dec!(120), "Dining Out", date(2024, 1, 5), "Self"))
        .unwrap();

    let mut replacement = expense("Filter Coffee", dec!(80), "Dining Out", date(2024, 1, 6), "");
    replacement.id = Some(id);
    let same_id = db.upsert_expense(&replacement).unwrap();
    assert_eq!(same_id, id);

    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.title, "Filter Coffee");
    assert_eq!(fetched.amount, dec!(80));
    assert!(fetched.person.is_none());
    assert_eq!(db.expense_count().unwrap(), 1);
}

#[test]
fn test_update_expense_full_row() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&expense("Rent", dec!(15000), "Rent", date(2024, 1, 1), "Self"))
        .unwrap();

    let mut edited = expense("House Rent", dec!(16000), "Rent", date(2024, 1, 2), "Family");
    edited.id = Some(id);
    db.update_expense(&edited).unwrap();

    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert_eq!(fetched.title, "House Rent");
    assert_eq!(fetched.amount, dec!(16000));
    assert_eq!(fetched.person.as_deref(), Some("Family"));
}

#[test]
fn test_update_without_id_fails() {
    let db = Database::open_in_memory().unwrap();
    let e = expense("Ghost", dec!(1), "", date(2024, 1, 1), "");
    assert!(db.update_expense(&e).is_err());
}

#[test]
fn test_delete_expense() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&expense("Petrol", dec!(1200), "Fuel", date(2024, 1, 15), ""))
        .unwrap();
    db.delete_expense(id).unwrap();
    assert!(db.get_expense_by_id(id).unwrap().is_none());
    assert_eq!(db.expense_count().unwrap(), 0);
}

#[test]
fn test_empty_sentinel_normalized_to_none() {
    let db = Database::open_in_memory().unwrap();
    let id = db
        .insert_expense(&expense("Misc", dec!(10), "", date(2024, 1, 1), ""))
        .unwrap();
    let fetched = db.get_expense_by_id(id).unwrap().unwrap();
    assert!(fetched.category.is_none());
    assert!(fetched.person.is_none());
}

// ── Aggregates ────────────────────────────────────────────────

#[test]
fn test_get_total_unfiltered() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_total().unwrap(), Decimal::ZERO);

    db.insert_expense(&expense("a", dec!(100.50), "A", date(2024, 1, 1), ""))
        .unwrap();
    db.insert_expense(&expense("b", dec!(49.50), "B", date(2024, 2, 1), ""))
        .unwrap();
    assert_eq!(db.get_total().unwrap(), dec!(150));
}

#[test]
fn test_category_totals_grouped_desc() {
    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&expense("x", dec!(10), "A", date(2024, 1, 1), ""))
        .unwrap();
    db.insert_expense(&expense("y", dec!(5), "B", date(2024, 1, 2), ""))
        .unwrap();
    db.insert_expense(&expense("z", dec!(3), "A", date(2024, 1, 3), ""))
        .unwrap();

    let totals = db.get_category_totals().unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].category, "A");
    assert_eq!(totals[0].total, dec!(13));
    assert_eq!(totals[1].category, "B");
    assert_eq!(totals[1].total, dec!(5));
}

#[test]
fn test_category_totals_bucket_empty_as_other() {
    let db = Database::open_in_memory().unwrap();
    db.insert_expense(&expense("m", dec!(7), "", date(2024, 1, 1), ""))
        .unwrap();
    let totals = db.get_category_totals().unwrap();
    assert_eq!(totals[0].category, "Other");
    assert_eq!(totals[0].total, dec!(7));
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budget_roundtrip_overall() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_budget(2024, 1, None).unwrap().is_none());

    db.upsert_budget(&Budget::overall(2024, 1, dec!(20000))).unwrap();
    let b = db.get_budget(2024, 1, None).unwrap().unwrap();
    assert_eq!(b.amount, dec!(20000));
    assert!(b.category.is_none());
}

#[test]
fn test_budget_upsert_last_write_wins() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::overall(2024, 1, dec!(20000))).unwrap();
    db.upsert_budget(&Budget::overall(2024, 1, dec!(25000))).unwrap();

    let b = db.get_budget(2024, 1, None).unwrap().unwrap();
    assert_eq!(b.amount, dec!(25000));

    let count: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_budget_keys_are_independent() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::overall(2024, 1, dec!(20000))).unwrap();
    db.upsert_budget(&Budget::overall(2024, 2, dec!(18000))).unwrap();
    db.upsert_budget(&Budget::for_category(2024, 1, "Groceries".into(), dec!(5000)))
        .unwrap();

    assert_eq!(db.get_budget(2024, 1, None).unwrap().unwrap().amount, dec!(20000));
    assert_eq!(db.get_budget(2024, 2, None).unwrap().unwrap().amount, dec!(18000));
    let scoped = db.get_budget(2024, 1, Some("Groceries")).unwrap().unwrap();
    assert_eq!(scoped.amount, dec!(5000));
    assert_eq!(scoped.category.as_deref(), Some("Groceries"));
}

#[test]
fn test_delete_budget_then_absent() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_budget(&Budget::overall(2024, 1, dec!(20000))).unwrap();
    db.delete_budget(2024, 1, None).unwrap();
    assert!(db.get_budget(2024, 1, None).unwrap().is_none());

    // Deleting again is a no-op, not an error.
    db.delete_budget(2024, 1, None).unwrap();
}

// ── Settings ──────────────────────────────────────────────────

#[test]
fn test_dark_mode_defaults_off_and_persists() {
    let db = Database::open_in_memory().unwrap();
    assert!(!db.dark_mode().unwrap());

    db.set_dark_mode(true).unwrap();
    assert!(db.dark_mode().unwrap());

    db.set_dark_mode(false).unwrap();
    assert!(!db.dark_mode().unwrap());
}

#[test]
fn test_dark_mode_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendtui.db");

    {
        let db = Database::open(&path).unwrap();
        db.set_dark_mode(true).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert!(db.dark_mode().unwrap());
}

// ── Sample data ───────────────────────────────────────────────

#[test]
fn test_seed_sample_expenses() {
    let mut db = Database::open_in_memory().unwrap();
    let today = date(2024, 6, 15);
    let n = db.seed_sample_expenses(today).unwrap();
    assert_eq!(n as i64, db.expense_count().unwrap());

    let all = db.get_expenses().unwrap();
    assert!(all.iter().any(|e| e.title == "House Rent"));
    // All seed rows are dated in the recent past.
    assert!(all.iter().all(|e| e.date < today && e.date >= date(2024, 6, 1)));
}
