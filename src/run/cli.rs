use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::filter::{self, DateRange, FilterState};
use crate::models::{percent_used, Expense};
use crate::recognize;
use crate::store::ExpenseStore;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], store),
        "export" => cli_export(&args[2..], store),
        "summary" | "s" => cli_summary(&args[2..], store),
        "budget" => cli_budget(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendTUI — local-only personal expense tracker");
    println!();
    println!("Usage: spendtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <title> <amount>          Record an expense");
    println!("    --category <name>           Category (default: guessed from title)");
    println!("    --person <name>             Who the spend was for");
    println!("    --date <YYYY-MM-DD>         Date (default: today)");
    println!("  export [path]                 Export expenses to CSV");
    println!("    --month <YYYY-MM>           Limit to one month (default: all)");
    println!("  summary [YYYY-MM]             Print monthly spend summary");
    println!("  budget <amount>|clear         Set or clear the monthly budget");
    println!("    --month <YYYY-MM>           Month to budget (default: current)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].clone())
}

/// "YYYY-MM" → the first day of that month.
fn parse_month(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

fn cli_add(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!(
            "Usage: spendtui add <title> <amount> [--category <name>] [--person <name>] [--date YYYY-MM-DD]"
        );
    }

    let title = args[0].trim().to_string();
    if title.is_empty() {
        anyhow::bail!("Title cannot be empty");
    }

    let today = Local::now().date_naive();
    // Lenient on purpose: bad amounts read as zero, bad dates as today.
    let amount = Decimal::from_str(args[1].trim())
        .unwrap_or_default()
        .max(Decimal::ZERO);
    let date = flag_value(args, "--date")
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .unwrap_or(today);
    let category = flag_value(args, "--category")
        .unwrap_or_else(|| recognize::recognize(&title).to_string());
    let person = flag_value(args, "--person");

    let expense = Expense::new(title.clone(), amount, Some(category.clone()), date, person);
    let id = store.add_expense(&expense)?;
    println!("Added #{id}: {title} — {} ({category}, {date})", format_amount(amount));

    Ok(())
}

fn cli_export(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    let month = flag_value(args, "--month");

    let raw = store.expenses()?;
    let (expenses, label) = match month.as_deref() {
        Some(m) => {
            let Some(first_day) = parse_month(m) else {
                anyhow::bail!("Invalid month: {m}. Use YYYY-MM (e.g. 2024-01)");
            };
            let filters = FilterState {
                range: DateRange::ThisMonth,
                ..FilterState::new()
            };
            (filter::apply(&raw, &filters, first_day), m.to_string())
        }
        None => (raw, "all".to_string()),
    };

    // Output path is the first non-flag argument
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/spendtui-export-{label}.csv")
        });

    let count = crate::export::export_to_csv(Path::new(&output_path), &expenses)?;
    if count == 0 {
        println!("No expenses to export");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

fn cli_summary(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    let month = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| Local::now().format("%Y-%m").to_string());
    let Some(first_day) = parse_month(&month) else {
        anyhow::bail!("Invalid month: {month}. Use YYYY-MM (e.g. 2024-01)");
    };

    let raw = store.expenses()?;
    let filters = FilterState {
        range: DateRange::ThisMonth,
        ..FilterState::new()
    };
    let in_month = filter::apply(&raw, &filters, first_day);
    let total = filter::total(&in_month);
    let budget = store.overall_budget(first_day.year(), first_day.month())?;

    println!("SpendTUI — {month}");
    println!("{}", "─".repeat(40));
    println!("  Spent:      {}", format_amount(total));
    match budget {
        Some(budget) => {
            let percent = percent_used(total, budget) * 100.0;
            println!("  Budget:     {} ({percent:.0}% used)", format_amount(budget));
        }
        None => println!("  Budget:     not set"),
    }
    println!("  Expenses:   {}", in_month.len());

    let by_category = filter::category_totals(&in_month);
    if !by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for entry in &by_category {
            println!("  {:<24} {}", entry.category, format_amount(entry.total));
        }
    }

    Ok(())
}

fn cli_budget(args: &[String], store: &mut ExpenseStore) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: spendtui budget <amount>|clear [--month YYYY-MM]");
    }

    let month = flag_value(args, "--month")
        .unwrap_or_else(|| Local::now().format("%Y-%m").to_string());
    let Some(first_day) = parse_month(&month) else {
        anyhow::bail!("Invalid month: {month}. Use YYYY-MM (e.g. 2024-01)");
    };
    let (year, month_num) = (first_day.year(), first_day.month());

    if args[0].eq_ignore_ascii_case("clear") {
        store.clear_overall_budget(year, month_num)?;
        println!("Cleared budget for {month}");
        return Ok(());
    }

    let Ok(amount) = Decimal::from_str(args[0].trim()) else {
        anyhow::bail!("Not an amount: {}", args[0]);
    };
    store.set_overall_budget(year, month_num, amount)?;
    match store.overall_budget(year, month_num)? {
        Some(stored) => println!("Budget for {month}: {}", format_amount(stored)),
        None => println!("Budget for {month} not set"),
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
