use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::models::DURATION_CHOICES;
use crate::tui::app::{FormField, HabitForm};
use crate::tui::widgets::color::parse_color;
use crate::Config;

const LABEL_WIDTH: usize = 10;

// Row offsets inside the block for the two text fields, used for
// cursor placement; must match the line layout built below
const NAME_ROW: u16 = 1;
const TIME_ROW: u16 = 9;

pub fn render_habit_form(f: &mut Frame, area: Rect, form: &HabitForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent_color = parse_color(&active_theme.accent);

    let label_style = |field: FormField| {
        if form.current_field == field {
            Style::default().fg(accent_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg_color)
        }
    };

    let label = |text: &str| format!("{:<width$}", text, width = LABEL_WIDTH);

    let mut lines = vec![Line::from("")];

    // Name
    lines.push(Line::from(vec![
        Span::styled(label("Name:"), label_style(FormField::Name)),
        Span::styled(form.name.value().to_string(), Style::default().fg(fg_color)),
    ]));
    lines.push(Line::from(""));

    // Emoji picker
    lines.push(Line::from(vec![
        Span::styled(label("Emoji:"), label_style(FormField::Emoji)),
        Span::styled(
            format!("◀ {} ▶", form.emoji),
            Style::default().fg(fg_color),
        ),
    ]));
    lines.push(Line::from(""));

    // Duration selector, 1-5 minutes
    let mut duration_spans = vec![Span::styled(
        label("Duration:"),
        label_style(FormField::Duration),
    )];
    for (i, minutes) in DURATION_CHOICES.iter().enumerate() {
        let selected = i == form.duration_index;
        let text = if selected {
            format!("[{}m]", minutes)
        } else {
            format!(" {}m ", minutes)
        };
        let style = if selected {
            Style::default().fg(accent_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg_color)
        };
        duration_spans.push(Span::styled(text, style));
        duration_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(duration_spans));
    lines.push(Line::from(""));

    // Reminder toggle
    lines.push(Line::from(vec![
        Span::styled(label("Reminder:"), label_style(FormField::Reminder)),
        Span::styled(
            if form.reminder_enabled {
                "[x] enabled"
            } else {
                "[ ] disabled"
            },
            Style::default().fg(fg_color),
        ),
    ]));
    lines.push(Line::from(""));

    // Reminder time, only when enabled
    if form.reminder_enabled {
        lines.push(Line::from(vec![
            Span::styled(label("Time:"), label_style(FormField::ReminderTime)),
            Span::styled(
                form.reminder_time.value().to_string(),
                Style::default().fg(fg_color),
            ),
            Span::styled("  (HH:MM)", Style::default().fg(fg_color).add_modifier(Modifier::DIM)),
        ]));
    }

    let title = if form.editing_habit_id.is_some() {
        "Edit Habit"
    } else {
        "New Habit"
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color));
    f.render_widget(paragraph, area);

    // Text cursor for the editable fields
    let cursor = match form.current_field {
        FormField::Name => Some((form.name.cursor(), NAME_ROW)),
        FormField::ReminderTime if form.reminder_enabled => {
            Some((form.reminder_time.cursor(), TIME_ROW))
        }
        _ => None,
    };
    if let Some((cursor_offset, row)) = cursor {
        let x = area.x + 1 + LABEL_WIDTH as u16 + cursor_offset as u16;
        let y = area.y + 1 + row;
        if x < area.x + area.width.saturating_sub(1) && y < area.y + area.height.saturating_sub(1) {
            f.set_cursor_position((x, y));
        }
    }
}
