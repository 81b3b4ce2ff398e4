use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single spend record. Snapshots are immutable: edits replace the whole
/// row by id, never a single field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expense {
    pub(crate) id: Option<i64>,
    pub(crate) title: String,
    pub(crate) amount: Decimal,
    pub(crate) category: Option<String>,
    pub(crate) date: NaiveDate,
    pub(crate) person: Option<String>,
}

impl Expense {
    pub(crate) fn new(
        title: String,
        amount: Decimal,
        category: Option<String>,
        date: NaiveDate,
        person: Option<String>,
    ) -> Self {
        Self {
            id: None,
            title,
            amount,
            category,
            date,
            person,
        }
    }

    pub(crate) fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(crate::recognize::FALLBACK)
    }
}

/// Derived per-category sum. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total: Decimal,
}
