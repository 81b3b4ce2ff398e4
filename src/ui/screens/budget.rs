use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::util::{format_amount, progress_bar};

/// Overall budget for the current month against the month's spend.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let today = Local::now().date_naive();
    let month_name = today.format("%B %Y").to_string();

    let mut lines = vec![Line::from("")];

    match app.budget {
        Some(budget) => {
            let ratio = app.month_budget_ratio();
            let color = theme.gauge_color(ratio);
            let left = (budget - app.month_total).max(rust_decimal::Decimal::ZERO);

            lines.push(Line::from(vec![
                Span::styled("  Monthly budget  ", theme.dim_style()),
                Span::styled(
                    format_amount(budget),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Spent so far    ", theme.dim_style()),
                Span::styled(format_amount(app.month_total), Style::default().fg(color)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Remaining       ", theme.dim_style()),
                Span::styled(format_amount(left), theme.normal_style()),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  ", theme.dim_style()),
                Span::styled(progress_bar(ratio, 32), Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]));
            if ratio >= 1.0 {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "  Budget exhausted for this month",
                    Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  No budget set for this month",
                theme.dim_style(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  Spent so far    ", theme.dim_style()),
                Span::styled(format_amount(app.month_total), theme.normal_style()),
            ]));
        }
    }

    lines.push(Line::from(""));
    if let Some(input) = &app.budget_input {
        lines.push(Line::from(vec![
            Span::styled("  New budget: ", Style::default().fg(theme.green)),
            Span::styled(input.as_str(), theme.command_bar_style()),
            Span::styled("▏", Style::default().fg(theme.green)),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "  Enter set budget | d clear budget",
            theme.dim_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay))
        .title(Span::styled(
            format!(" Budget — {month_name} "),
            Style::default()
                .fg(theme.text_dim)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
