use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;
use crate::Config;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 70);

    // Clear the background so content does not show through
    f.render_widget(Clear, popup_area);

    let help_text = build_help_text(config);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
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

fn build_help_text(config: &Config) -> String {
    let bindings = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!(
        "  {} / {}: Move through the habit list\n",
        format_key_binding_for_display(&bindings.list_up),
        format_key_binding_for_display(&bindings.list_down)
    ));
    text.push_str("  ↑ / ↓: Same, with the arrow keys\n");
    text.push('\n');

    text.push_str("Habits:\n");
    text.push_str(&format!(
        "  {}: Complete the selected habit (or undo today's completion)\n",
        format_key_binding_for_display(&bindings.toggle_complete)
    ));
    text.push_str(&format!(
        "  {}: New habit\n",
        format_key_binding_for_display(&bindings.new)
    ));
    text.push_str(&format!(
        "  {} or {}: Edit the selected habit\n",
        format_key_binding_for_display(&bindings.edit),
        format_key_binding_for_display(&bindings.select)
    ));
    text.push_str(&format!(
        "  {}: Delete the selected habit\n",
        format_key_binding_for_display(&bindings.delete)
    ));
    text.push('\n');

    text.push_str("Form:\n");
    text.push_str("  Tab / Shift+Tab: Move between fields\n");
    text.push_str("  ← / →: Change emoji, duration, or the reminder toggle\n");
    text.push_str("  Enter: Next field; saves from the last field\n");
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!(
        "  {}: Settings (theme)\n",
        format_key_binding_for_display(&bindings.settings)
    ));
    text.push_str(&format!(
        "  {}: Show/hide help\n",
        format_key_binding_for_display(&bindings.help)
    ));
    text.push_str(&format!(
        "  {}: Quit\n",
        format_key_binding_for_display(&bindings.quit)
    ));

    text
}
