//! TUI pane rendering modules
//!
//! - [`source`]: Source code display, highlighted with the language's own lexer
//! - [`tree`]: Indented outline of the parsed AST
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a primary `render_*` function.

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by all panes
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_idle)
    }
}

/// Clamp `offset` so a pane of `visible_height` rows never scrolls past its content
pub(crate) fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *offset = (*offset).min(max_scroll);
    } else {
        *offset = 0;
    }
}
