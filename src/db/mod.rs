mod schema;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Budget, CategoryTotal, Expense};

const DARK_MODE_KEY: &str = "dark_mode";

/// SQLite-backed storage gateway. The nullable model fields (`category`,
/// `person`) are stored as `''` sentinels and normalized back to `None`
/// here, so nothing above this layer ever sees the sentinel.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (title, amount, category, date, person)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.title,
                expense.amount.to_string(),
                expense.category.as_deref().unwrap_or(""),
                expense.date.format("%Y-%m-%d").to_string(),
                expense.person.as_deref().unwrap_or(""),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert-or-replace by id. A record without an id falls back to a
    /// plain insert; a record with one replaces the stored row wholesale.
    pub(crate) fn upsert_expense(&self, expense: &Expense) -> Result<i64> {
        let Some(id) = expense.id else {
            return self.insert_expense(expense);
        };
        self.conn.execute(
            "INSERT OR REPLACE INTO expenses (id, title, amount, category, date, person)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                expense.title,
                expense.amount.to_string(),
                expense.category.as_deref().unwrap_or(""),
                expense.date.format("%Y-%m-%d").to_string(),
                expense.person.as_deref().unwrap_or(""),
            ],
        )?;
        Ok(id)
    }

    /// Full-row update by id. Field-level patches don't exist on purpose.
    pub(crate) fn update_expense(&self, expense: &Expense) -> Result<()> {
        let Some(id) = expense.id else {
            anyhow::bail!("Cannot update an expense that was never stored");
        };
        self.conn.execute(
            "UPDATE expenses SET title = ?1, amount = ?2, category = ?3, date = ?4, person = ?5
             WHERE id = ?6",
            params![
                expense.title,
                expense.amount.to_string(),
                expense.category.as_deref().unwrap_or(""),
                expense.date.format("%Y-%m-%d").to_string(),
                expense.person.as_deref().unwrap_or(""),
                id,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// All expenses, newest first (date desc, id desc). The filter
    /// pipeline relies on this ordering and preserves it.
    pub(crate) fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, category, date, person
             FROM expenses ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        let result = self.conn.query_row(
            "SELECT id, title, amount, category, date, person FROM expenses WHERE id = ?1",
            params![id],
            expense_from_row,
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    /// Sum over ALL records, unfiltered.
    pub(crate) fn get_total(&self) -> Result<Decimal> {
        let total: String = self.conn.query_row(
            "SELECT CAST(COALESCE(SUM(amount), 0) AS TEXT) FROM expenses",
            [],
            |row| row.get(0),
        )?;
        Ok(Decimal::from_str(&total).unwrap_or_default())
    }

    /// Per-category sums over ALL records, descending by sum.
    pub(crate) fn get_category_totals(&self) -> Result<Vec<CategoryTotal>> {
        let mut stmt = self.conn.prepare(
            "SELECT COALESCE(NULLIF(category, ''), 'Other'), CAST(SUM(amount) AS TEXT)
             FROM expenses
             GROUP BY COALESCE(NULLIF(category, ''), 'Other')
             ORDER BY SUM(amount) DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let category: String = row.get(0)?;
            let total_str: String = row.get(1)?;
            Ok(CategoryTotal {
                category,
                total: Decimal::from_str(&total_str).unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn upsert_budget(&self, budget: &Budget) -> Result<()> {
        self.conn.execute(
            "INSERT INTO budgets (year, month, category, amount)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(year, month, category) DO UPDATE SET amount = ?4",
            params![
                budget.year,
                budget.month,
                budget.category.as_deref().unwrap_or(""),
                budget.amount.to_string(),
            ],
        )?;
        Ok(())
    }

    pub(crate) fn get_budget(
        &self,
        year: i32,
        month: u32,
        category: Option<&str>,
    ) -> Result<Option<Budget>> {
        let result = self.conn.query_row(
            "SELECT id, year, month, category, amount FROM budgets
             WHERE year = ?1 AND month = ?2 AND category = ?3",
            params![year, month, category.unwrap_or("")],
            |row| {
                let category: String = row.get(3)?;
                let amount_str: String = row.get(4)?;
                Ok(Budget {
                    id: Some(row.get(0)?),
                    year: row.get(1)?,
                    month: row.get(2)?,
                    category: if category.is_empty() {
                        None
                    } else {
                        Some(category)
                    },
                    amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                })
            },
        );
        match result {
            Ok(b) => Ok(Some(b)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deleting a budget that was never set is fine; absence afterwards
    /// simply means "no budget".
    pub(crate) fn delete_budget(&self, year: i32, month: u32, category: Option<&str>) -> Result<()> {
        self.conn.execute(
            "DELETE FROM budgets WHERE year = ?1 AND month = ?2 AND category = ?3",
            params![year, month, category.unwrap_or("")],
        )?;
        Ok(())
    }

    // ── Settings ──────────────────────────────────────────────

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    /// The persisted theme preference. Missing reads as light mode.
    pub(crate) fn dark_mode(&self) -> Result<bool> {
        Ok(self.get_setting(DARK_MODE_KEY)?.as_deref() == Some("1"))
    }

    pub(crate) fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.set_setting(DARK_MODE_KEY, if enabled { "1" } else { "0" })
    }

    // ── Sample data ───────────────────────────────────────────

    /// First-launch seed, dated relative to `today`. The caller checks
    /// `expense_count` first; this inserts unconditionally.
    pub(crate) fn seed_sample_expenses(&mut self, today: NaiveDate) -> Result<usize> {
        let samples: &[(&str, &str, &str, u64, &str)] = &[
            ("Vegetables & Milk", "650", "Groceries", 1, "Family"),
            ("House Rent", "15000", "Rent", 3, "Self"),
            ("Mobile Recharge", "249", "Mobile/Internet", 2, "Self"),
            ("Auto to Office", "120", "Transport", 1, "Self"),
            ("Petrol", "1200", "Fuel", 4, "Self"),
            ("Dinner Out", "900", "Dining Out", 5, "Family"),
            ("Electricity Bill", "2100", "Utilities", 7, "Family"),
            ("Tuition Fees", "3000", "Education", 6, "Child"),
            ("Health Medicines", "450", "Medical", 2, "Parent"),
        ];

        let tx = self.conn.transaction()?;
        for &(title, amount, category, days_ago, person) in samples {
            let date = today - Days::new(days_ago);
            tx.execute(
                "INSERT INTO expenses (title, amount, category, date, person)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![title, amount, category, date.format("%Y-%m-%d").to_string(), person],
            )?;
        }
        tx.commit()?;
        Ok(samples.len())
    }
}

fn expense_from_row(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
    let amount_str: String = row.get(2)?;
    let category: String = row.get(3)?;
    let date_str: String = row.get(4)?;
    let person: String = row.get(5)?;
    Ok(Expense {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        amount: Decimal::from_str(&amount_str).unwrap_or_default(),
        category: if category.is_empty() {
            None
        } else {
            Some(category)
        },
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
        person: if person.is_empty() { None } else { Some(person) },
    })
}

#[cfg(test)]
mod tests;
