use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::widgets::color::parse_color;
use crate::Config;

/// Welcome screen shown until the user finishes onboarding
pub fn render_onboarding(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent_color = parse_color(&active_theme.accent);

    // Push the content down a little when there is room
    let top_padding = (area.height.saturating_sub(12) / 3) as usize;

    let mut lines: Vec<Line> = std::iter::repeat_with(|| Line::from(""))
        .take(top_padding)
        .collect();

    lines.push(Line::styled(
        "⏳  minihabit",
        Style::default().fg(accent_color).add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from("Build lasting habits, one small step at a time"));
    lines.push(Line::from(""));
    lines.push(Line::from("• Pick habits that take 1-5 minutes"));
    lines.push(Line::from("• Complete them once a day"));
    lines.push(Line::from("• Keep the streak alive 🔥"));
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Press Enter to get started",
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Welcome"))
        .style(Style::default().fg(fg_color));

    f.render_widget(paragraph, area);
}
