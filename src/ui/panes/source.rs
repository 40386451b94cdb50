//! Source code pane rendering with syntax highlighting
//!
//! Each line is highlighted by running the real [`Lexer`] over it, so the
//! colors always agree with how the parser sees the text. Whatever follows an
//! invalid token on a line is shown unstyled.

use crate::parser::lexer::{Lexer, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight a single line of source
fn highlight_line(line: &str) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0;
    let mut lexer = Lexer::new(line);

    loop {
        let token = lexer.next_token();
        if matches!(token.kind, TokenKind::Eof | TokenKind::Invalid) {
            break;
        }

        // Columns are 1-based and the line has no newline, so column - 1 is a char index
        let start = token.location.column.saturating_sub(1).min(chars.len());
        if start > cursor {
            spans.push(Span::raw(chars[cursor..start].iter().collect::<String>()));
        }
        cursor = start + token.lexeme.chars().count();
        spans.push(Span::styled(token.lexeme, token_style(token.kind)));
    }

    if cursor < chars.len() {
        spans.push(Span::raw(chars[cursor..].iter().collect::<String>()));
    }

    Line::from(spans)
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Int
        | TokenKind::Long
        | TokenKind::Float
        | TokenKind::Double
        | TokenKind::String => Style::default().fg(DEFAULT_THEME.type_name), // Types
        TokenKind::If
        | TokenKind::Else
        | TokenKind::For
        | TokenKind::Define
        | TokenKind::Import
        | TokenKind::Function
        | TokenKind::Return
        | TokenKind::Break
        | TokenKind::Continue
        | TokenKind::Const
        | TokenKind::Static => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::StringLiteral => Style::default().fg(DEFAULT_THEME.string_literal),
        TokenKind::IntLiteral | TokenKind::LongLiteral | TokenKind::FloatLiteral => {
            Style::default().fg(DEFAULT_THEME.number_literal)
        }
        TokenKind::LParen
        | TokenKind::RParen
        | TokenKind::LBracket
        | TokenKind::RBracket
        | TokenKind::LBrace
        | TokenKind::RBrace => Style::default().fg(DEFAULT_THEME.punctuation), // Brackets
        _ => Style::default().fg(DEFAULT_THEME.text),
    }
}

/// Render the source code pane.
///
/// `error_line` is the 1-based line of a parse error, if any.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1
    super::clamp_scroll(scroll_offset, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.muted) // Line numbers
            };

            let mut content_line = highlight_line(line);
            if is_error {
                for span in &mut content_line.spans {
                    span.style = span.style.patch(Style::default().bg(DEFAULT_THEME.bar_bg));
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
