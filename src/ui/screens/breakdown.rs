use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::util::{format_amount, progress_bar, truncate};

/// Per-category totals of the filtered set, largest first, each with a
/// bar scaled against the biggest category.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    if app.category_totals.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Nothing to break down", theme.dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add expenses or loosen the filters",
                theme.dim_style(),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.overlay))
                .title(Span::styled(
                    " Breakdown ",
                    Style::default()
                        .fg(theme.text_dim)
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(msg, area);
        return;
    }

    let max = app
        .category_totals
        .first()
        .map(|t| t.total)
        .unwrap_or(Decimal::ZERO);

    let items: Vec<ListItem> = app
        .category_totals
        .iter()
        .enumerate()
        .skip(app.breakdown_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, entry)| {
            let ratio = if max > Decimal::ZERO {
                (entry.total / max).to_f64().unwrap_or(0.0)
            } else {
                0.0
            };

            let share = if app.total > Decimal::ZERO {
                (entry.total / app.total).to_f64().unwrap_or(0.0) * 100.0
            } else {
                0.0
            };

            let style = if i == app.breakdown_index {
                theme.selected_style()
            } else if i % 2 == 1 {
                theme.alt_row_style()
            } else {
                theme.normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", truncate(&entry.category, 17)), style),
                Span::styled(
                    format!("{:>14} ", format_amount(entry.total)),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(progress_bar(ratio, 24), Style::default().fg(theme.accent)),
                Span::styled(format!(" {share:>4.1}%"), theme.dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.overlay))
            .title(Span::styled(
                format!(
                    " Breakdown ({} categories, {} total) ",
                    app.category_totals.len(),
                    format_amount(app.total)
                ),
                Style::default()
                    .fg(theme.text_dim)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}
