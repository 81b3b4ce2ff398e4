use anyhow::Result;
use chrono::{Datelike, Local};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rust_decimal::Decimal;
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::str::FromStr;

use crate::store::ExpenseStore;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut ExpenseStore) -> Result<()> {
    let mut app = App::new(store.dark_mode());

    // Store mutations flip this flag; the loop refreshes before drawing.
    let dirty = Rc::new(Cell::new(false));
    let subscription = {
        let dirty = dirty.clone();
        store.events().subscribe(move |_| dirty.set(true))
    };

    app.refresh(store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store, &dirty);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // The observing surface is gone, so its subscription goes too.
    store.events().unsubscribe(subscription);

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut ExpenseStore,
    dirty: &Rc<Cell<bool>>,
) -> Result<()> {
    while app.running {
        if dirty.take() {
            app.refresh(store)?;
        }

        terminal.draw(|f| {
            // Tab bar + status + command bars + borders + table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Search => handle_search_input(key, app, store)?,
                InputMode::Editing => handle_editing_input(key, app, store)?,
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut ExpenseStore) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.filters.search.clear();
            app.refresh(store)?;
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => app.screen = Screen::Expenses,
        KeyCode::Char('2') => app.screen = Screen::Breakdown,
        KeyCode::Char('3') | KeyCode::Char('b') => app.screen = Screen::Budget,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + 1) % screens.len()];
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + screens.len() - 1) % screens.len()];
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('a') => {
            app.screen = Screen::Expenses;
            app.open_add_form(Local::now().date_naive());
        }
        KeyCode::Char('e') if app.screen == Screen::Expenses => app.open_edit_form(),
        KeyCode::Char('d') if app.screen == Screen::Expenses => {
            let selected = app.selected_expense().map(|e| (e.id, e.title.clone()));
            if let Some((Some(id), title)) = selected {
                app.confirm_message = format!("Delete '{title}'?");
                app.pending_action = Some(PendingAction::DeleteExpense { id, title });
                app.input_mode = InputMode::Confirm;
            }
        }
        KeyCode::Char('d') if app.screen == Screen::Budget => {
            if app.budget.is_some() {
                app.confirm_message = "Reset the monthly budget?".into();
                app.pending_action = Some(PendingAction::ClearBudget);
                app.input_mode = InputMode::Confirm;
            } else {
                app.set_status("No budget to clear");
            }
        }
        KeyCode::Char('c') => {
            app.cycle_category_filter(true);
            refresh_with_filter_status(app, store)?;
        }
        KeyCode::Char('C') => {
            app.cycle_category_filter(false);
            refresh_with_filter_status(app, store)?;
        }
        KeyCode::Char('p') => {
            app.cycle_person_filter();
            refresh_with_filter_status(app, store)?;
        }
        KeyCode::Char('r') => {
            app.cycle_range();
            refresh_with_filter_status(app, store)?;
        }
        KeyCode::Char('x') => commands::handle_command("export", app, store)?,
        KeyCode::Char('t') => commands::handle_command("dark", app, store)?,
        KeyCode::Enter if app.screen == Screen::Budget => {
            let current = app.budget.map(|b| b.to_string()).unwrap_or_default();
            app.budget_input = Some(current);
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Esc => {
            if app.filters.is_active() {
                app.clear_filters();
                app.refresh(store)?;
                app.set_status("Filters cleared");
            } else {
                app.status_message.clear();
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
    Ok(())
}

fn refresh_with_filter_status(app: &mut App, store: &mut ExpenseStore) -> Result<()> {
    app.refresh(store)?;
    let summary = app.filter_summary();
    if summary.is_empty() {
        app.set_status("Filters cleared");
    } else {
        app.set_status(format!("Filters: {summary}"));
    }
    Ok(())
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Expenses => scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            page,
        ),
        Screen::Breakdown => scroll_down(
            &mut app.breakdown_index,
            &mut app.breakdown_scroll,
            app.category_totals.len(),
            page,
        ),
        Screen::Budget => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Breakdown => scroll_up(&mut app.breakdown_index, &mut app.breakdown_scroll),
        Screen::Budget => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Breakdown => scroll_to_top(&mut app.breakdown_index, &mut app.breakdown_scroll),
        Screen::Budget => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Expenses => scroll_to_bottom(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.len(),
            page,
        ),
        Screen::Breakdown => scroll_to_bottom(
            &mut app.breakdown_index,
            &mut app.breakdown_scroll,
            app.category_totals.len(),
            page,
        ),
        Screen::Budget => {}
    }
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut ExpenseStore,
) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut ExpenseStore,
) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.filters.search.clear();
            app.refresh(store)?;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.filters.search.pop();
            app.refresh(store)?;
        }
        // Every keystroke recomputes the whole pipeline. Fine at personal
        // data volumes; revisit if lists ever reach tens of thousands.
        KeyCode::Char(c) => {
            app.filters.search.push(c);
            app.refresh(store)?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut ExpenseStore,
) -> Result<()> {
    if app.budget_input.is_some() {
        return handle_budget_input(key, app, store);
    }

    let Some(form) = app.form.as_mut() else {
        app.input_mode = InputMode::Normal;
        return Ok(());
    };

    match key.code {
        KeyCode::Esc => {
            app.form = None;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            let today = Local::now().date_naive();
            match form.to_expense(today) {
                Some(expense) => {
                    let is_edit = expense.id.is_some();
                    if is_edit {
                        store.update_expense(&expense)?;
                    } else {
                        store.add_expense(&expense)?;
                    }
                    app.form = None;
                    app.input_mode = InputMode::Normal;
                    app.set_status(format!(
                        "{} '{}'",
                        if is_edit { "Updated" } else { "Added" },
                        expense.title
                    ));
                }
                None => app.set_status("Title is required"),
            }
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
    Ok(())
}

fn handle_budget_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut ExpenseStore,
) -> Result<()> {
    let Some(input) = app.budget_input.as_mut() else {
        return Ok(());
    };

    match key.code {
        KeyCode::Esc => {
            app.budget_input = None;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            // Same leniency as the expense form: garbage reads as zero.
            let amount = Decimal::from_str(input.trim()).unwrap_or_default();
            let today = Local::now().date_naive();
            store.set_overall_budget(today.year(), today.month(), amount)?;
            app.budget_input = None;
            app.input_mode = InputMode::Normal;
            app.set_status(format!("Budget for {} set", today.format("%B %Y")));
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) => {
            input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut ExpenseStore,
) -> Result<()> {
    let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
    let action = app.pending_action.take();
    app.confirm_message.clear();
    app.input_mode = InputMode::Normal;

    if !confirmed {
        app.set_status("Cancelled");
        return Ok(());
    }

    match action {
        Some(PendingAction::DeleteExpense { id, title }) => {
            store.delete_expense(id)?;
            app.set_status(format!("Deleted '{title}'"));
        }
        Some(PendingAction::ClearBudget) => {
            let today = Local::now().date_naive();
            store.clear_overall_budget(today.year(), today.month())?;
            app.set_status("Monthly budget cleared");
        }
        None => {}
    }
    Ok(())
}
