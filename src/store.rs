use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{Budget, CategoryTotal, Expense};
use crate::signal::Signal;

/// Change notification emitted after a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreEvent {
    ExpensesChanged,
    BudgetsChanged,
}

/// The storage gateway the rest of the application talks to: a
/// [`Database`] plus a change signal. Every successful mutation emits
/// exactly one event after the write lands; a failed write propagates the
/// error and emits nothing, so observers keep their previous (stale but
/// consistent) derived state.
pub(crate) struct ExpenseStore {
    db: Database,
    events: Signal<StoreEvent>,
}

impl ExpenseStore {
    pub(crate) fn new(db: Database) -> Self {
        Self {
            db,
            events: Signal::new(),
        }
    }

    pub(crate) fn events(&self) -> &Signal<StoreEvent> {
        &self.events
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn add_expense(&self, expense: &Expense) -> Result<i64> {
        let id = self.db.insert_expense(expense)?;
        self.events.emit(&StoreEvent::ExpensesChanged);
        Ok(id)
    }

    /// Create-or-replace by id.
    pub(crate) fn save_expense(&self, expense: &Expense) -> Result<i64> {
        let id = self.db.upsert_expense(expense)?;
        self.events.emit(&StoreEvent::ExpensesChanged);
        Ok(id)
    }

    pub(crate) fn update_expense(&self, expense: &Expense) -> Result<()> {
        self.db.update_expense(expense)?;
        self.events.emit(&StoreEvent::ExpensesChanged);
        Ok(())
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        self.db.delete_expense(id)?;
        self.events.emit(&StoreEvent::ExpensesChanged);
        Ok(())
    }

    pub(crate) fn expenses(&self) -> Result<Vec<Expense>> {
        self.db.get_expenses()
    }

    pub(crate) fn expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        self.db.get_expense_by_id(id)
    }

    pub(crate) fn expense_count(&self) -> Result<i64> {
        self.db.expense_count()
    }

    /// Unfiltered sum over all records.
    pub(crate) fn total(&self) -> Result<Decimal> {
        self.db.get_total()
    }

    /// Unfiltered per-category sums.
    pub(crate) fn category_totals(&self) -> Result<Vec<CategoryTotal>> {
        self.db.get_category_totals()
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Upsert the overall budget for a month. Negative amounts are
    /// clamped to zero before they reach storage.
    pub(crate) fn set_overall_budget(&self, year: i32, month: u32, amount: Decimal) -> Result<()> {
        let clamped = amount.max(Decimal::ZERO);
        self.db.upsert_budget(&Budget::overall(year, month, clamped))?;
        self.events.emit(&StoreEvent::BudgetsChanged);
        Ok(())
    }

    pub(crate) fn clear_overall_budget(&self, year: i32, month: u32) -> Result<()> {
        self.db.delete_budget(year, month, None)?;
        self.events.emit(&StoreEvent::BudgetsChanged);
        Ok(())
    }

    pub(crate) fn overall_budget(&self, year: i32, month: u32) -> Result<Option<Decimal>> {
        Ok(self.db.get_budget(year, month, None)?.map(|b| b.amount))
    }

    /// Category-scoped read. The key exists in storage but no interactive
    /// flow writes it yet.
    pub(crate) fn category_budget(
        &self,
        year: i32,
        month: u32,
        category: &str,
    ) -> Result<Option<Decimal>> {
        Ok(self
            .db
            .get_budget(year, month, Some(category))?
            .map(|b| b.amount))
    }

    // ── Settings ──────────────────────────────────────────────

    pub(crate) fn dark_mode(&self) -> bool {
        self.db.dark_mode().unwrap_or(false)
    }

    pub(crate) fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.db.set_dark_mode(enabled)
    }

    // ── Sample data ───────────────────────────────────────────

    /// Seed the starter expenses on a completely empty database.
    /// Returns how many rows were inserted (zero when data exists).
    pub(crate) fn seed_if_empty(&mut self, today: NaiveDate) -> Result<usize> {
        if self.db.expense_count()? > 0 {
            return Ok(0);
        }
        let n = self.db.seed_sample_expenses(today)?;
        self.events.emit(&StoreEvent::ExpensesChanged);
        Ok(n)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
