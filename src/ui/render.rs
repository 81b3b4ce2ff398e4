use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, FormField, InputMode, Screen};
use super::commands;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.form.is_some() {
        render_form_overlay(f, f.area(), app);
    }
    if app.show_help {
        render_help_overlay(f, f.area(), app);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme.text_dim)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme.text_dim),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme.overlay)))
        .style(Style::default().bg(theme.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Expenses => super::screens::expenses::render(f, area, app),
        Screen::Breakdown => super::screens::breakdown::render(f, area, app),
        Screen::Budget => super::screens::budget::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme.accent,
        InputMode::Command | InputMode::Editing => theme.green,
        InputMode::Search => theme.yellow,
        InputMode::Confirm => theme.red,
    };
    let mode_style = Style::default()
        .fg(theme.header_bg)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(" {} | {} expenses", app.screen, app.expense_count);

    let right = match app.screen {
        Screen::Expenses => " a add | e edit | d delete | c/p/r filters | x export | ? help ",
        Screen::Breakdown => " j/k navigate | c/p/r filters | ? help ",
        Screen::Budget => " Enter set | d clear | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme.status_bar_style()),
        Span::styled(" ".repeat(pad), theme.status_bar_style()),
        Span::styled(right, theme.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme.accent)),
                Span::styled(&app.command_input, theme.command_bar_style()),
            ]),
            Some(1 + app.command_input.len() as u16),
        ),
        InputMode::Search => {
            let match_info = if !app.filters.search.is_empty() {
                format!("  ({} matches)", app.expenses.len())
            } else {
                String::new()
            };
            (
                Line::from(vec![
                    Span::styled("/", Style::default().fg(theme.yellow)),
                    Span::styled(&app.filters.search, theme.command_bar_style()),
                    Span::styled(match_info, theme.dim_style()),
                ]),
                Some(1 + app.filters.search.len() as u16),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme.yellow)),
                Span::styled(" [y/N] ", Style::default().fg(theme.red)),
            ]),
            None,
        ),
        InputMode::Editing | InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, / to search, ? for help",
                    theme.dim_style(),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, theme.command_bar_style()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_form_overlay(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(form) = &app.form else {
        return;
    };

    let title = if form.is_edit() {
        " Edit Expense "
    } else {
        " Add Expense "
    };

    let mut lines = vec![Line::from("")];
    for field in FormField::all() {
        let active = *field == form.field;
        let marker = if active { "▸ " } else { "  " };
        let label_style = if active {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            theme.dim_style()
        };
        let value = form.value(*field);
        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<10}", field.label()), label_style),
            Span::styled(value.to_string(), theme.normal_style()),
        ];
        if active {
            spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Tab/↓ next field  ↑ prev  Enter save  Esc cancel ",
        theme.dim_style(),
    )));

    let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 56.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let form_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme.header_bg)),
    );
    f.render_widget(form_widget, popup_area);
}

fn render_help_overlay(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let section = Style::default()
        .fg(theme.yellow)
        .add_modifier(Modifier::BOLD);

    let mut help_text = vec![
        Line::from(Span::styled(
            " SpendTUI Help ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", section)),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-3        Switch tabs",
            theme.normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
            theme.normal_style(),
        )),
        Line::from(Span::styled(
            "  Ctrl-q           Quit",
            theme.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Actions", section)),
        Line::from(Span::styled(
            "  a/e/d           Add/Edit/Delete        /          Search (live)",
            theme.normal_style(),
        )),
        Line::from(Span::styled(
            "  c/C             Cycle category filter  p          Cycle person",
            theme.normal_style(),
        )),
        Line::from(Span::styled(
            "  r               Cycle date range       x          Export CSV",
            theme.normal_style(),
        )),
        Line::from(Span::styled(
            "  t               Toggle dark mode       Esc        Clear filters",
            theme.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", section)),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<22} {desc}"),
            theme.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme.text_dim),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.header_bg)),
    );
    f.render_widget(help, popup_area);
}
