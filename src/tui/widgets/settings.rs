use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, StatefulWidget};
use ratatui::Frame;

use crate::tui::app::SettingsState;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::Config;

/// Theme picker modal. The highlighted theme is applied with Enter and
/// persisted to the config file.
pub fn render_settings(f: &mut Frame, area: Rect, config: &Config, settings: &mut SettingsState) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup_area = popup_area(area, 40, 60);

    // Clear the background so content does not show through
    f.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = settings
        .themes
        .iter()
        .map(|name| {
            let marker = if *name == config.current_theme {
                "● "
            } else {
                "  "
            };
            ListItem::new(format!("{}{}", marker, name))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Settings - Theme")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, popup_area, f.buffer_mut(), &mut settings.list_state);
}

/// Centered rect taking a percentage of the available area, after the
/// ratatui popup example
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
