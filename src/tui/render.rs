use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::date;
use crate::tui::app::{App, Mode};
use crate::tui::widgets::{
    color::parse_color,
    confirm_delete::render_confirm_delete,
    form::render_habit_form,
    habit_list::render_habit_list,
    help::render_help,
    onboarding::render_onboarding,
    settings::render_settings,
    status_bar::render_status_bar,
};
use crate::tui::Layout;
use crate::utils::format_key_binding_for_display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    // Outer border with the app name centered in the top edge
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("minihabit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    if app.mode != Mode::Onboarding {
        render_header(f, app, layout);
    }

    // Main pane: onboarding and the form replace the list, everything
    // else overlays it
    match app.mode {
        Mode::Onboarding => {
            render_onboarding(f, layout.main_area, &app.config);
        }
        Mode::Form => {
            if let Some(ref form) = app.form {
                render_habit_form(f, layout.main_area, form, &app.config);
            }
        }
        _ => {
            render_habit_list(
                f,
                layout.main_area,
                app.store.habits(),
                &mut app.list_state,
                &app.config,
            );
        }
    }

    // Overlays render after the normal content
    if app.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }

    if app.mode == Mode::Settings {
        render_settings(f, f.area(), &app.config, &mut app.settings);
    }

    if app.mode == Mode::ConfirmDelete {
        if let Some(name) = app
            .delete_confirmation
            .as_ref()
            .and_then(|id| app.store.find(id))
            .map(|h| h.name.clone())
        {
            render_confirm_delete(f, f.area(), &name, app.delete_modal_selection, &app.config);
        }
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &key_hints,
        &app.config,
    );
}

/// One-line header: today's date on the left, completion progress on
/// the right
fn render_header(f: &mut Frame, app: &App, layout: &Layout) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent_color = parse_color(&active_theme.accent);

    let total = app.store.habits().len();
    let done = app.completed_count();
    let progress = if total > 0 {
        format!("{}/{} done today", done, total)
    } else {
        String::new()
    };

    let date_text = date::format_date(app.today);
    let width = layout.header_area.width as usize;
    let gap = width
        .saturating_sub(date_text.chars().count())
        .saturating_sub(progress.chars().count());

    let line = Line::from(vec![
        Span::styled(date_text, Style::default().fg(fg_color)),
        Span::raw(" ".repeat(gap)),
        Span::styled(
            progress,
            Style::default().fg(accent_color).add_modifier(Modifier::BOLD),
        ),
    ]);

    f.render_widget(Paragraph::new(line), layout.header_area);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let bindings = &app.config.key_bindings;
    match app.mode {
        Mode::Onboarding => vec![
            "Enter: Get started".to_string(),
            format!("{}: Quit", format_key_binding_for_display(&bindings.quit)),
        ],
        Mode::Form => vec![
            "Tab/Enter: Next field".to_string(),
            "←/→: Change value".to_string(),
            "Enter on last field: Save".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::ConfirmDelete => vec![
            "↑/↓: Choose".to_string(),
            "Enter: Confirm".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::Help => vec![format!(
            "Esc or {}: Close help",
            format_key_binding_for_display(&bindings.help)
        )],
        Mode::Settings => vec![
            "↑/↓: Choose theme".to_string(),
            "Enter: Apply".to_string(),
            "Esc: Close".to_string(),
        ],
        Mode::List => vec![
            format!(
                "{}: Done/undo",
                format_key_binding_for_display(&bindings.toggle_complete)
            ),
            format!("{}: New", format_key_binding_for_display(&bindings.new)),
            format!("{}: Edit", format_key_binding_for_display(&bindings.edit)),
            format!(
                "{}: Delete",
                format_key_binding_for_display(&bindings.delete)
            ),
            format!(
                "{}: Settings",
                format_key_binding_for_display(&bindings.settings)
            ),
            format!("{}: Help", format_key_binding_for_display(&bindings.help)),
            format!("{}: Quit", format_key_binding_for_display(&bindings.quit)),
        ],
    }
}
