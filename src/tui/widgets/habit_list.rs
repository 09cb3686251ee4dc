use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, StatefulWidget,
};
use ratatui::Frame;

use crate::models::Habit;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::Config;

pub fn render_habit_list(
    f: &mut Frame,
    area: Rect,
    habits: &[Habit],
    list_state: &mut ListState,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent_color = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };

    if habits.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("📝  No habits yet"),
            Line::from(""),
            Line::from(format!(
                "Press {} to create your first habit",
                config.key_bindings.new
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Habits"))
        .style(Style::default().fg(fg_color));
        f.render_widget(empty, area);
        return;
    }

    // Account for borders, padding, and the scrollbar column
    let max_width = area.width.saturating_sub(5) as usize;

    let items: Vec<ListItem> = habits
        .iter()
        .map(|habit| {
            let mark = if habit.completed_today { "✓" } else { "○" };
            let streak = if habit.streak > 0 {
                format!("  🔥 {}", habit.streak)
            } else {
                String::new()
            };

            let mut label = format!("{} {} {} ({}m)", mark, habit.emoji, habit.name, habit.duration);
            if label.chars().count() + streak.chars().count() > max_width {
                let keep = max_width
                    .saturating_sub(streak.chars().count())
                    .saturating_sub(3);
                label = label.chars().take(keep).collect::<String>() + "...";
            }

            let mut spans = vec![Span::styled(label, Style::default().fg(fg_color))];
            if !streak.is_empty() {
                spans.push(Span::styled(
                    streak,
                    Style::default().fg(accent_color).add_modifier(Modifier::BOLD),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    // Reserve a column for the scrollbar
    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let list_area = list_areas[0];
    let scrollbar_area = list_areas[1];

    let title = format!("Habits ({})", habits.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, list_area, f.buffer_mut(), list_state);

    // Scrollbar only when the list overflows
    let visible_items = list_area.height.saturating_sub(2) as usize;
    if habits.len() > visible_items && scrollbar_area.width > 0 && list_area.height > 2 {
        let scrollbar_inner_area = Rect::new(
            scrollbar_area.x,
            list_area.y + 1,
            scrollbar_area.width,
            list_area.height.saturating_sub(2),
        );

        let selected_index = list_state.selected().unwrap_or(0);
        let scroll_position = if selected_index < visible_items {
            0
        } else {
            selected_index.saturating_sub(visible_items - 1)
        };

        let mut scrollbar_state = ScrollbarState::new(habits.len())
            .viewport_content_length(visible_items)
            .position(scroll_position);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
    }
}
