//! Color palette shared by the viewer panes

use ratatui::style::Color;

/// Colors keyed by what they paint: token classes, node labels and chrome
pub struct Theme {
    pub text: Color,
    pub punctuation: Color,
    pub operator: Color,
    pub muted: Color,
    pub ok: Color,
    pub error: Color,
    pub keyword: Color,
    pub string_literal: Color,
    pub number_literal: Color,
    pub callable: Color,
    pub type_name: Color,
    pub border_focused: Color,
    pub border_idle: Color,
    /// Status bar and error line background
    pub bar_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    text: Color::Rgb(205, 214, 244),
    punctuation: Color::Rgb(137, 180, 250),
    operator: Color::Rgb(250, 179, 135),
    muted: Color::Rgb(108, 112, 134),
    ok: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),
    string_literal: Color::Rgb(166, 227, 161),
    number_literal: Color::Rgb(250, 179, 135),
    callable: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),
    border_focused: Color::Rgb(249, 226, 175),
    border_idle: Color::Rgb(108, 112, 134),
    bar_bg: Color::Rgb(50, 50, 70),
};
