use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Expense;

/// Fixed header the export always carries, in this column order.
const HEADER: [&str; 5] = ["Title", "Amount", "Category", "Date", "Person"];

/// Write the given expenses (typically the currently filtered list) to a
/// CSV file. Commas inside free-text fields become spaces; there is no
/// quoting beyond that, so the output stays trivially greppable.
/// Returns the number of data rows written.
pub(crate) fn export_to_csv(path: &Path, expenses: &[Expense]) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;

    writer.write_record(HEADER)?;
    for expense in expenses {
        writer.write_record([
            sanitize(&expense.title),
            expense.amount.to_string(),
            sanitize(expense.category.as_deref().unwrap_or("")),
            expense.date.format("%Y-%m-%d").to_string(),
            sanitize(expense.person.as_deref().unwrap_or("")),
        ])?;
    }
    writer.flush().context("Failed to flush export file")?;

    Ok(expenses.len())
}

fn sanitize(field: &str) -> String {
    field.replace(',', " ")
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
