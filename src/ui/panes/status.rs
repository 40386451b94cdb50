//! Status bar rendering with keybindings and parse state

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom.
///
/// `node_count` is `None` when the parse failed.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, node_count: Option<usize>) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let (badge, badge_color) = match node_count {
        Some(count) => (format!(" {} nodes ", count), DEFAULT_THEME.ok),
        None => (" PARSE ERROR ".to_string(), DEFAULT_THEME.error),
    };

    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.bar_bg)
                .fg(DEFAULT_THEME.muted),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.bar_bg)
                .fg(if node_count.is_some() {
                    DEFAULT_THEME.text
                } else {
                    DEFAULT_THEME.error
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.bar_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.muted).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.bar_bg)
        .fg(DEFAULT_THEME.text);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.bar_bg)
        .fg(DEFAULT_THEME.muted);

    let right_spans = vec![
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" scroll ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.bar_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
