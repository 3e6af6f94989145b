//! # TitleBar Component
//!
//! Single-row heading: the page title and the model generating the report.
//! Stateless; all data arrives as props.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const PAGE_HEADING: &str = "Tee ilmainen avainsanatutkimus";

pub struct TitleBar {
    pub model_name: String,
}

impl TitleBar {
    pub fn new(model_name: String) -> Self {
        Self { model_name }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                PAGE_HEADING,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (malli: {})", self.model_name),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(line, area);
    }
}
