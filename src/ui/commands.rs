use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::app::{App, Screen};
use crate::filter::DateRange;
use crate::recognize;
use crate::store::ExpenseStore;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut ExpenseStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendTUI", cmd_quit, r);
    register_command!("quit", "Quit SpendTUI", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("add", "Add an expense", cmd_add, r);
    register_command!("a", "Add an expense", cmd_add, r);
    register_command!(
        "cat",
        "Filter by category (e.g. :cat Groceries), no arg clears",
        cmd_cat,
        r
    );
    register_command!(
        "person",
        "Filter by person (e.g. :person Self), no arg clears",
        cmd_person,
        r
    );
    register_command!(
        "range",
        "Date range: all, week, month, or 2024-01-01..2024-01-31",
        cmd_range,
        r
    );
    register_command!("clear", "Clear all filters", cmd_clear, r);
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 20000), or :budget clear",
        cmd_budget,
        r
    );
    register_command!(
        "export",
        "Export the filtered list to CSV (e.g. :export ~/jan.csv)",
        cmd_export,
        r
    );
    register_command!("dark", "Toggle dark mode", cmd_dark, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut ExpenseStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.open_add_form(Local::now().date_naive());
    Ok(())
}

fn cmd_cat(args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.filters.category = None;
        app.refresh(store)?;
        app.set_status("Category filter cleared");
        return Ok(());
    }

    // Prefer the canonical spelling when the name matches a known label,
    // but let custom categories through untouched.
    let canonical = recognize::categories()
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(args));
    let category = canonical.map_or_else(|| args.to_string(), str::to_string);

    app.set_status(format!("Filtering by category: {category}"));
    app.filters.category = Some(category);
    app.refresh(store)?;
    Ok(())
}

fn cmd_person(args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.filters.person = None;
        app.refresh(store)?;
        app.set_status("Person filter cleared");
        return Ok(());
    }

    app.filters.person = Some(args.to_string());
    app.refresh(store)?;
    app.set_status(format!("Filtering by person: {args}"));
    Ok(())
}

fn cmd_range(args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    let range = match args {
        "" | "all" => Some(DateRange::All),
        "week" => Some(DateRange::ThisWeek),
        "month" => Some(DateRange::ThisMonth),
        custom => parse_custom_range(custom),
    };

    match range {
        Some(range) => {
            app.set_status(format!("Date range: {}", range.label()));
            app.filters.range = range;
            app.refresh(store)?;
        }
        None => {
            app.set_status("Usage: :range all | week | month | YYYY-MM-DD..YYYY-MM-DD");
        }
    }
    Ok(())
}

fn parse_custom_range(args: &str) -> Option<DateRange> {
    let (start, end) = args.split_once("..")?;
    let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d").ok()?;
    (start <= end).then_some(DateRange::Custom { start, end })
}

fn cmd_clear(_args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.clear_filters();
    app.refresh(store)?;
    app.set_status("Filters cleared");
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    if args.eq_ignore_ascii_case("clear") {
        store.clear_overall_budget(today.year(), today.month())?;
        app.refresh(store)?;
        app.set_status("Monthly budget cleared");
        return Ok(());
    }

    match Decimal::from_str(args.trim()) {
        Ok(amount) => {
            store.set_overall_budget(today.year(), today.month(), amount)?;
            app.refresh(store)?;
            app.set_status(format!(
                "Budget for {} set",
                today.format("%B %Y")
            ));
        }
        Err(_) => app.set_status("Usage: :budget <amount> | :budget clear"),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _store: &mut ExpenseStore) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let today = Local::now().date_naive().format("%Y-%m-%d");
        format!("{home}/spendtui-export-{today}.csv")
    } else {
        crate::run::shellexpand(args)
    };

    match crate::export::export_to_csv(std::path::Path::new(&path), &app.expenses) {
        Ok(count) => app.set_status(format!("Exported {count} expenses to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}

fn cmd_dark(_args: &str, app: &mut App, store: &mut ExpenseStore) -> anyhow::Result<()> {
    app.dark_mode = !app.dark_mode;
    app.theme = super::theme::Theme::for_mode(app.dark_mode);
    store.set_dark_mode(app.dark_mode)?;
    app.set_status(if app.dark_mode {
        "Dark mode on"
    } else {
        "Dark mode off"
    });
    Ok(())
}
