use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    render_summary(f, chunks[0], app);
    render_list(f, chunks[1], app);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let total_line = Line::from(vec![
        Span::styled(" Total ", theme.dim_style()),
        Span::styled(
            format_amount(app.total),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({} of {} expenses)", app.expenses.len(), app.expense_count),
            theme.dim_style(),
        ),
    ]);

    let budget_line = match app.budget {
        Some(budget) => {
            let ratio = app.budget_ratio();
            let color = theme.gauge_color(ratio);
            Line::from(vec![
                Span::styled(" Budget ", theme.dim_style()),
                Span::styled(
                    format!("{} of {} ", format_amount(app.total), format_amount(budget)),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])
        }
        None => Line::from(vec![
            Span::styled(" Budget ", theme.dim_style()),
            Span::styled("not set — :budget <amount>", theme.dim_style()),
        ]),
    };

    let summary = Paragraph::new(vec![total_line, budget_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.overlay))
            .title(Span::styled(
                " This view ",
                Style::default()
                    .fg(theme.text_dim)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(summary, area);
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    if app.expenses.is_empty() {
        let msg = if app.filters.is_active() {
            vec![
                Line::from(""),
                Line::from(Span::styled("No expenses match the active filters", theme.dim_style())),
                Line::from(""),
                Line::from(Span::styled("Press Esc to clear them", theme.dim_style())),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No expenses yet", theme.dim_style())),
                Line::from(""),
                Line::from(Span::styled("Press a to add one", theme.dim_style())),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.overlay))
            .title(Span::styled(
                " Expenses (0) ",
                Style::default()
                    .fg(theme.text_dim)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Title", "Category", "Amount", "Person"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let style = if i == app.expense_index {
                theme.selected_style()
            } else if i % 2 == 1 {
                theme.alt_row_style()
            } else {
                theme.normal_style()
            };

            Row::new(vec![
                Cell::from(expense.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&expense.title, 36)),
                Cell::from(truncate(expense.category_label(), 16)),
                Cell::from(Span::styled(format_amount(expense.amount), theme.amount_style())),
                Cell::from(expense.person.as_deref().unwrap_or("—").to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(12),
    ];

    let filters = app.filter_summary();
    let title = if filters.is_empty() {
        format!(" Expenses ({}) ", app.expenses.len())
    } else {
        format!(" Expenses ({}) {} ", app.expenses.len(), filters)
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.overlay))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme.text_dim)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
