use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{CategoryTotal, Expense};
use crate::recognize;

/// Date window selector for the expense list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateRange {
    All,
    /// Monday through Sunday of the week containing today, inclusive.
    ThisWeek,
    /// First through last calendar day of the current month, inclusive.
    ThisMonth,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    /// Concrete inclusive bounds for the range, or `None` for all time.
    /// `today` is passed in rather than read from the clock so callers
    /// (and tests) control what "current" means.
    pub(crate) fn resolve(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Self::All => None,
            Self::ThisWeek => Some(week_bounds(today)),
            Self::ThisMonth => Some(month_bounds(today)),
            Self::Custom { start, end } => Some((start, end)),
        }
    }

    pub(crate) fn label(&self) -> String {
        match self {
            Self::All => "all time".into(),
            Self::ThisWeek => "this week".into(),
            Self::ThisMonth => "this month".into(),
            Self::Custom { start, end } => format!("{start}..{end}"),
        }
    }
}

fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    let end = start + Days::new(6);
    (start, end)
}

fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(today);
    (first, last)
}

/// The four independent filter selectors. All of them AND together.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilterState {
    /// Exact category match.
    pub(crate) category: Option<String>,
    /// Case-insensitive exact person match.
    pub(crate) person: Option<String>,
    pub(crate) range: DateRange,
    /// Case-insensitive substring over title, category, and person.
    pub(crate) search: String,
}

impl FilterState {
    pub(crate) fn new() -> Self {
        Self {
            category: None,
            person: None,
            range: DateRange::All,
            search: String::new(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.category.is_some()
            || self.person.is_some()
            || self.range != DateRange::All
            || !self.search.trim().is_empty()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply all four filters to an expense list. Pure and order-preserving:
/// the output keeps the input's (date desc, id desc) ordering.
pub(crate) fn apply(expenses: &[Expense], filters: &FilterState, today: NaiveDate) -> Vec<Expense> {
    let bounds = filters.range.resolve(today);
    let query = filters.search.trim().to_lowercase();

    expenses
        .iter()
        .filter(|e| match &filters.category {
            Some(cat) => e.category.as_deref() == Some(cat.as_str()),
            None => true,
        })
        .filter(|e| match &filters.person {
            Some(person) => e
                .person
                .as_deref()
                .is_some_and(|p| p.trim().to_lowercase() == person.trim().to_lowercase()),
            None => true,
        })
        .filter(|e| match bounds {
            Some((start, end)) => e.date >= start && e.date <= end,
            None => true,
        })
        .filter(|e| {
            if query.is_empty() {
                return true;
            }
            e.title.to_lowercase().contains(&query)
                || e.category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&query))
                || e.person
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

/// Sum of amounts, zero for an empty list.
pub(crate) fn total(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Group-by-category sums, descending by sum (category name breaks ties).
/// Uncategorized expenses bucket under the recognizer fallback label.
pub(crate) fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for e in expenses {
        let label = e.category.as_deref().unwrap_or(recognize::FALLBACK);
        match totals.iter_mut().find(|t| t.category == label) {
            Some(t) => t.total += e.amount,
            None => totals.push(CategoryTotal {
                category: label.to_string(),
                total: e.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    totals
}

/// Distinct person labels from the UNFILTERED collection: trimmed,
/// non-blank, case-insensitively deduplicated (first spelling wins),
/// alphabetically sorted. Feeds the person filter chips regardless of the
/// currently active filters.
pub(crate) fn distinct_persons(expenses: &[Expense]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut persons: Vec<String> = Vec::new();
    for e in expenses {
        let Some(person) = e.person.as_deref() else {
            continue;
        };
        let trimmed = person.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            persons.push(trimmed.to_string());
        }
    }
    persons.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    persons
}
