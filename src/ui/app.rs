//! Main TUI application state and logic

use crate::parser::{parse_source, ParseError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code being viewed
    pub source_code: String,

    /// Outline of the parsed program, empty when parsing failed
    pub outline: Vec<String>,

    /// Total AST nodes, `None` when parsing failed
    pub node_count: Option<usize>,

    /// The parse failure, if any
    pub error: Option<ParseError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Parse `source_code` and build the viewer state
    pub fn new(source_code: String) -> Self {
        let (outline, node_count, error, status_message) = match parse_source(&source_code) {
            Ok(program) => (
                program.outline(),
                Some(program.node_count()),
                None,
                String::from("Parsed successfully"),
            ),
            Err(err) => {
                let message = err.to_string();
                (Vec::new(), None, Some(err), message)
            }
        };

        App {
            source_code,
            outline,
            node_count,
            error,
            focused_pane: FocusedPane::Tree,
            source_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        if let Some(err) = &self.error {
            // Start with the offending line in view
            self.source_scroll = err.location().line.saturating_sub(3);
            self.focused_pane = FocusedPane::Source;
        }

        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Two panes side by side, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            self.error.as_ref().map(|err| err.location().line),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            columns[1],
            &self.outline,
            "(no tree: parse failed)",
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.node_count,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(10);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
        }
    }
}
