use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

use crate::tui::app::{App, FormField, Mode};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::render::render;
use crate::utils::{has_primary_modifier, parse_key_binding};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Guard that ensures terminal state is restored even on panic.
/// A terminal left in raw mode or the alternate screen is unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore terminal state on normal exit; the drop impl then does
    /// nothing
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors here, this is already a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the
    // error lands in the normal terminal
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;

    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, minimum required: {}x{}.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();
        app.check_day_rollover();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            render(f, &mut app, &layout);
        })?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(&mut app, key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    guard.restore()?;
    Ok(())
}

/// Check a key event against a configured binding string
fn matches_binding(key: &KeyEvent, binding: &str) -> bool {
    match parse_key_binding(binding) {
        Ok(parsed) => {
            key.code == parsed.key_code && parsed.requires_ctrl == has_primary_modifier(key.modifiers)
        }
        Err(_) => false,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.mode {
        Mode::Onboarding => handle_onboarding_keys(app, key),
        Mode::List => handle_list_keys(app, key),
        Mode::Form => handle_form_keys(app, key),
        Mode::ConfirmDelete => handle_confirm_delete_keys(app, key),
        Mode::Help => handle_help_keys(app, key),
        Mode::Settings => handle_settings_keys(app, key),
    }
}

fn handle_onboarding_keys(app: &mut App, key: KeyEvent) {
    let bindings = app.config.key_bindings.clone();
    if key.code == KeyCode::Enter {
        app.complete_onboarding();
    } else if matches_binding(&key, &bindings.quit) || key.code == KeyCode::Esc {
        app.should_quit = true;
    }
}

fn handle_list_keys(app: &mut App, key: KeyEvent) {
    let bindings = app.config.key_bindings.clone();

    if matches_binding(&key, &bindings.quit) {
        app.should_quit = true;
    } else if matches_binding(&key, &bindings.list_down) || key.code == KeyCode::Down {
        app.select_next();
    } else if matches_binding(&key, &bindings.list_up) || key.code == KeyCode::Up {
        app.select_previous();
    } else if matches_binding(&key, &bindings.toggle_complete) {
        app.toggle_selected_completion();
    } else if matches_binding(&key, &bindings.new) {
        app.open_create_form();
    } else if matches_binding(&key, &bindings.edit) || matches_binding(&key, &bindings.select) {
        app.open_edit_form();
    } else if matches_binding(&key, &bindings.delete) {
        app.request_delete();
    } else if matches_binding(&key, &bindings.help) {
        app.mode = Mode::Help;
    } else if matches_binding(&key, &bindings.settings) {
        app.open_settings();
    }
}

fn handle_form_keys(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.cancel_form();
        return;
    }

    // Enter submits from the last field and advances otherwise;
    // Tab/BackTab always move between fields
    match key.code {
        KeyCode::Enter => {
            let on_last = app.form.as_ref().is_some_and(|f| f.is_last_field());
            if on_last {
                app.save_form();
            } else if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.prev_field();
            }
            return;
        }
        _ => {}
    }

    let Some(form) = app.form.as_mut() else {
        return;
    };

    match form.current_field {
        FormField::Name => handle_input_keys(&mut form.name, key),
        FormField::Emoji => match key.code {
            KeyCode::Left => form.cycle_emoji(false),
            KeyCode::Right | KeyCode::Char(' ') => form.cycle_emoji(true),
            _ => {}
        },
        FormField::Duration => match key.code {
            KeyCode::Left => form.cycle_duration(false),
            KeyCode::Right | KeyCode::Char(' ') => form.cycle_duration(true),
            _ => {}
        },
        FormField::Reminder => {
            if matches!(
                key.code,
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            ) {
                form.reminder_enabled = !form.reminder_enabled;
            }
        }
        FormField::ReminderTime => handle_input_keys(&mut form.reminder_time, key),
    }
}

fn handle_input_keys(input: &mut crate::tui::widgets::input::Input, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.delete_char(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        KeyCode::Home => input.move_cursor_home(),
        KeyCode::End => input.move_cursor_end(),
        _ => {}
    }
}

fn handle_confirm_delete_keys(app: &mut App, key: KeyEvent) {
    let bindings = app.config.key_bindings.clone();

    match key.code {
        KeyCode::Esc => app.cancel_delete(),
        KeyCode::Enter => app.apply_delete_choice(),
        KeyCode::Up | KeyCode::Down => {
            app.delete_modal_selection = 1 - app.delete_modal_selection;
        }
        _ => {
            if matches_binding(&key, &bindings.list_up) || matches_binding(&key, &bindings.list_down)
            {
                app.delete_modal_selection = 1 - app.delete_modal_selection;
            }
        }
    }
}

fn handle_help_keys(app: &mut App, key: KeyEvent) {
    let bindings = app.config.key_bindings.clone();
    if key.code == KeyCode::Esc || matches_binding(&key, &bindings.help) {
        app.mode = Mode::List;
    }
}

fn handle_settings_keys(app: &mut App, key: KeyEvent) {
    let bindings = app.config.key_bindings.clone();

    match key.code {
        KeyCode::Esc => app.mode = Mode::List,
        KeyCode::Enter => app.apply_selected_theme(),
        KeyCode::Down => app.settings_select_next(),
        KeyCode::Up => app.settings_select_previous(),
        _ => {
            if matches_binding(&key, &bindings.list_down) {
                app.settings_select_next();
            } else if matches_binding(&key, &bindings.list_up) {
                app.settings_select_previous();
            } else if matches_binding(&key, &bindings.settings) {
                app.mode = Mode::List;
            }
        }
    }
}
