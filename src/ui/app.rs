use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::filter::{self, DateRange, FilterState};
use crate::models::{percent_used, CategoryTotal, Expense};
use crate::recognize;
use crate::store::ExpenseStore;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Expenses,
    Breakdown,
    Budget,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Expenses, Self::Breakdown, Self::Budget]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expenses => write!(f, "Expenses"),
            Self::Breakdown => write!(f, "Breakdown"),
            Self::Budget => write!(f, "Budget"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, title: String },
    ClearBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Title,
    Amount,
    Category,
    Date,
    Person,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Title,
            Self::Amount,
            Self::Category,
            Self::Date,
            Self::Person,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Date => "Date",
            Self::Person => "Person",
        }
    }

    fn next(&self) -> Self {
        let fields = Self::all();
        let idx = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(idx + 1) % fields.len()]
    }

    fn prev(&self) -> Self {
        let fields = Self::all();
        let idx = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(idx + fields.len() - 1) % fields.len()]
    }
}

/// In-flight add/edit form. All fields are edited as text; parsing
/// happens once on save, with the lenient fallbacks (bad amount → 0,
/// bad date → today) the original input screens had.
#[derive(Debug, Clone)]
pub(crate) struct ExpenseForm {
    pub(crate) id: Option<i64>,
    pub(crate) field: FormField,
    pub(crate) title: String,
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) date: String,
    pub(crate) person: String,
    /// Once the user touches the category by hand, stop auto-suggesting.
    category_touched: bool,
}

impl ExpenseForm {
    pub(crate) fn blank(today: NaiveDate) -> Self {
        Self {
            id: None,
            field: FormField::Title,
            title: String::new(),
            amount: String::new(),
            category: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            person: String::new(),
            category_touched: false,
        }
    }

    pub(crate) fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            field: FormField::Title,
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.clone().unwrap_or_default(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            person: expense.person.clone().unwrap_or_default(),
            category_touched: true,
        }
    }

    pub(crate) fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Amount => &self.amount,
            FormField::Category => &self.category,
            FormField::Date => &self.date,
            FormField::Person => &self.person,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub(crate) fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    pub(crate) fn push_char(&mut self, c: char) {
        match self.field {
            FormField::Title => {
                self.title.push(c);
                self.suggest_category();
            }
            FormField::Amount => self.amount.push(c),
            FormField::Category => {
                self.category.push(c);
                self.category_touched = true;
            }
            FormField::Date => self.date.push(c),
            FormField::Person => self.person.push(c),
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.field {
            FormField::Title => {
                self.title.pop();
                self.suggest_category();
            }
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Category => {
                self.category.pop();
                self.category_touched = true;
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Person => {
                self.person.pop();
            }
        }
    }

    fn suggest_category(&mut self) {
        if !self.category_touched {
            self.category = recognize::recognize(&self.title).to_string();
        }
    }

    /// Resolve the form to an expense record, or `None` when the title is
    /// blank. Amount and date fall back rather than failing.
    pub(crate) fn to_expense(&self, today: NaiveDate) -> Option<Expense> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }

        let amount = Decimal::from_str(self.amount.trim())
            .unwrap_or_default()
            .max(Decimal::ZERO);
        let date =
            NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").unwrap_or(today);
        let category = match self.category.trim() {
            "" => recognize::recognize(title).to_string(),
            c => c.to_string(),
        };
        let person = self.person.trim();

        Some(Expense {
            id: self.id,
            title: title.to_string(),
            amount,
            category: Some(category),
            date,
            person: (!person.is_empty()).then(|| person.to_string()),
        })
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) theme: Theme,
    pub(crate) dark_mode: bool,

    // Filter state feeding the pipeline
    pub(crate) filters: FilterState,

    // Derived views, recomputed by `refresh`
    pub(crate) expenses: Vec<Expense>,
    pub(crate) total: Decimal,
    pub(crate) category_totals: Vec<CategoryTotal>,
    pub(crate) persons: Vec<String>,
    pub(crate) month_total: Decimal,
    pub(crate) budget: Option<Decimal>,
    pub(crate) expense_count: usize,

    // Cursors
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) breakdown_index: usize,
    pub(crate) breakdown_scroll: usize,

    // Add/edit form and budget entry
    pub(crate) form: Option<ExpenseForm>,
    pub(crate) budget_input: Option<String>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(dark_mode: bool) -> Self {
        Self {
            running: true,
            screen: Screen::Expenses,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            theme: Theme::for_mode(dark_mode),
            dark_mode,

            filters: FilterState::new(),

            expenses: Vec::new(),
            total: Decimal::ZERO,
            category_totals: Vec::new(),
            persons: Vec::new(),
            month_total: Decimal::ZERO,
            budget: None,
            expense_count: 0,

            expense_index: 0,
            expense_scroll: 0,
            breakdown_index: 0,
            breakdown_scroll: 0,

            form: None,
            budget_input: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Recompute every derived view from the store and the current
    /// filters. Runs after each store event and each filter change.
    pub(crate) fn refresh(&mut self, store: &ExpenseStore) -> Result<()> {
        self.refresh_at(store, Local::now().date_naive())
    }

    pub(crate) fn refresh_at(&mut self, store: &ExpenseStore, today: NaiveDate) -> Result<()> {
        let raw = store.expenses()?;
        self.persons = filter::distinct_persons(&raw);
        self.expenses = filter::apply(&raw, &self.filters, today);
        self.total = filter::total(&self.expenses);
        self.category_totals = filter::category_totals(&self.expenses);

        let this_month = FilterState {
            range: DateRange::ThisMonth,
            ..FilterState::new()
        };
        self.month_total = filter::total(&filter::apply(&raw, &this_month, today));
        self.budget = store.overall_budget(today.year(), today.month())?;
        self.expense_count = raw.len();

        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.breakdown_index >= self.category_totals.len() {
            self.breakdown_index = self.category_totals.len().saturating_sub(1);
        }
        Ok(())
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    /// Fraction of the monthly budget eaten by the CURRENT filtered
    /// total, mirroring the original list screen's gauge.
    pub(crate) fn budget_ratio(&self) -> f64 {
        percent_used(self.total, self.budget.unwrap_or(Decimal::ZERO))
    }

    /// Same gauge, but against the full calendar-month spend.
    pub(crate) fn month_budget_ratio(&self) -> f64 {
        percent_used(self.month_total, self.budget.unwrap_or(Decimal::ZERO))
    }

    // ── Filter cycling ────────────────────────────────────────

    pub(crate) fn cycle_category_filter(&mut self, forward: bool) {
        let cats = recognize::categories();
        let current = self
            .filters
            .category
            .as_deref()
            .and_then(|c| cats.iter().position(|k| *k == c));
        self.filters.category = match (current, forward) {
            (None, true) => Some(cats[0].to_string()),
            (None, false) => cats.last().map(|c| c.to_string()),
            (Some(i), true) if i + 1 < cats.len() => Some(cats[i + 1].to_string()),
            (Some(0), false) => None,
            (Some(i), false) => Some(cats[i - 1].to_string()),
            _ => None,
        };
    }

    pub(crate) fn cycle_person_filter(&mut self) {
        if self.persons.is_empty() {
            self.filters.person = None;
            return;
        }
        let current = self
            .filters
            .person
            .as_deref()
            .and_then(|p| self.persons.iter().position(|k| k == p));
        self.filters.person = match current {
            None => self.persons.first().cloned(),
            Some(i) if i + 1 < self.persons.len() => Some(self.persons[i + 1].clone()),
            Some(_) => None,
        };
    }

    pub(crate) fn cycle_range(&mut self) {
        self.filters.range = match self.filters.range {
            DateRange::All => DateRange::ThisWeek,
            DateRange::ThisWeek => DateRange::ThisMonth,
            DateRange::ThisMonth | DateRange::Custom { .. } => DateRange::All,
        };
    }

    pub(crate) fn clear_filters(&mut self) {
        self.filters = FilterState::new();
    }

    /// One-line description of the active filters for titles/status.
    pub(crate) fn filter_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(cat) = &self.filters.category {
            parts.push(format!("cat:{cat}"));
        }
        if let Some(person) = &self.filters.person {
            parts.push(format!("person:{person}"));
        }
        if self.filters.range != DateRange::All {
            parts.push(self.filters.range.label());
        }
        if !self.filters.search.trim().is_empty() {
            parts.push(format!("search:'{}'", self.filters.search.trim()));
        }
        parts.join(" ")
    }

    // ── Forms ─────────────────────────────────────────────────

    pub(crate) fn open_add_form(&mut self, today: NaiveDate) {
        self.form = Some(ExpenseForm::blank(today));
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn open_edit_form(&mut self) {
        match self.selected_expense().cloned() {
            Some(expense) => {
                self.form = Some(ExpenseForm::from_expense(&expense));
                self.input_mode = InputMode::Editing;
            }
            None => self.set_status("Nothing selected to edit"),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
