#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;

fn store() -> ExpenseStore {
    ExpenseStore::new(Database::open_in_memory().unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn petrol() -> Expense {
    Expense::new(
        "Petrol".into(),
        dec!(1200),
        Some("Fuel".into()),
        date(2024, 1, 15),
        Some("Self".into()),
    )
}

fn record_events(store: &ExpenseStore) -> Rc<RefCell<Vec<StoreEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    // Subscription intentionally leaked for the duration of the test.
    let _ = store.events().subscribe(move |e| sink.borrow_mut().push(*e));
    seen
}

// ── Mutations emit exactly one event ──────────────────────────

#[test]
fn test_add_emits_expenses_changed() {
    let store = store();
    let seen = record_events(&store);

    store.add_expense(&petrol()).unwrap();
    assert_eq!(*seen.borrow(), vec![StoreEvent::ExpensesChanged]);
}

#[test]
fn test_save_update_delete_each_emit_once() {
    let store = store();
    let id = store.add_expense(&petrol()).unwrap();
    let seen = record_events(&store);

    let mut edited = petrol();
    edited.id = Some(id);
    edited.amount = dec!(1300);
    store.update_expense(&edited).unwrap();
    store.save_expense(&edited).unwrap();
    store.delete_expense(id).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            StoreEvent::ExpensesChanged,
            StoreEvent::ExpensesChanged,
            StoreEvent::ExpensesChanged,
        ]
    );
}

#[test]
fn test_failed_write_emits_nothing() {
    let store = store();
    let seen = record_events(&store);

    // No id: update is rejected before touching storage.
    assert!(store.update_expense(&petrol()).is_err());
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_reads_emit_nothing() {
    let store = store();
    store.add_expense(&petrol()).unwrap();
    let seen = record_events(&store);

    store.expenses().unwrap();
    store.total().unwrap();
    store.category_totals().unwrap();
    store.overall_budget(2024, 1).unwrap();
    assert!(seen.borrow().is_empty());
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_set_budget_emits_and_reads_back() {
    let store = store();
    let seen = record_events(&store);

    store.set_overall_budget(2024, 1, dec!(20000)).unwrap();
    assert_eq!(*seen.borrow(), vec![StoreEvent::BudgetsChanged]);
    assert_eq!(store.overall_budget(2024, 1).unwrap(), Some(dec!(20000)));
}

#[test]
fn test_negative_budget_clamped_to_zero() {
    let store = store();
    store.set_overall_budget(2024, 1, dec!(-500)).unwrap();
    assert_eq!(store.overall_budget(2024, 1).unwrap(), Some(Decimal::ZERO));
}

#[test]
fn test_clear_budget_then_none() {
    let store = store();
    store.set_overall_budget(2024, 1, dec!(20000)).unwrap();
    store.clear_overall_budget(2024, 1).unwrap();
    assert_eq!(store.overall_budget(2024, 1).unwrap(), None);
}

#[test]
fn test_category_budget_read_path() {
    let store = store();
    assert_eq!(store.category_budget(2024, 1, "Groceries").unwrap(), None);
}

// ── Seeding ───────────────────────────────────────────────────

#[test]
fn test_seed_if_empty_runs_once() {
    let mut store = store();
    let seen = record_events(&store);

    let first = store.seed_if_empty(date(2024, 6, 15)).unwrap();
    assert!(first > 0);
    assert_eq!(*seen.borrow(), vec![StoreEvent::ExpensesChanged]);

    let second = store.seed_if_empty(date(2024, 6, 16)).unwrap();
    assert_eq!(second, 0);
    // No second event for the no-op.
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_seed_skipped_when_data_exists() {
    let mut store = store();
    store.add_expense(&petrol()).unwrap();
    assert_eq!(store.seed_if_empty(date(2024, 6, 15)).unwrap(), 0);
    assert_eq!(store.expense_count().unwrap(), 1);
}
