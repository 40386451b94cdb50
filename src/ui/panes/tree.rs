//! AST outline pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Style for an outline entry, keyed on the node label's leading word
fn label_style(label: &str) -> Style {
    match label.split_whitespace().next().unwrap_or("") {
        "Function" | "Call" => Style::default().fg(DEFAULT_THEME.callable),
        "Value" => Style::default().fg(DEFAULT_THEME.number_literal),
        "Identifier" => Style::default().fg(DEFAULT_THEME.text),
        "If" | "For" | "Return" | "Break" | "Continue" | "Import" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "Define" | "Pointer" | "Array" => Style::default().fg(DEFAULT_THEME.type_name),
        _ => Style::default().fg(DEFAULT_THEME.operator),
    }
}

/// Render the AST outline pane. An empty outline shows `placeholder`.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[String],
    placeholder: &str,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    if outline.is_empty() {
        let paragraph = Paragraph::new(placeholder.to_string())
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.muted));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    super::clamp_scroll(scroll_offset, outline.len(), visible_height);

    let visible_items: Vec<ListItem> = outline
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|entry| {
            let label = entry.trim_start();
            let indent = &entry[..entry.len() - label.len()];
            ListItem::new(Line::from(vec![
                Span::styled(indent.to_string(), Style::default().fg(DEFAULT_THEME.muted)),
                Span::styled(label.to_string(), label_style(label)),
            ]))
        })
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
