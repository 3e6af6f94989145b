//! # Confirmation Component
//!
//! Replaces the form once a submission has been accepted locally. Shows the
//! confirmation heading and what the lead-capture service said about the
//! record: in flight, accepted, per-field errors, or a transport failure.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::state::LeadCaptureState;
use crate::tui::component::Component;

pub const CONFIRMATION_HEADING: &str = "Tässä avainsanatutkimus ole hyvä!";
const SUBMITTING_TEXT: &str = "Lähetetään yhteystietoja...";
const ACCEPTED_TEXT: &str = "Kiitos! Lähetämme tulokset myös sähköpostiisi.";
const FAILURE_PREFIX: &str = "Yhteystietojen lähetys epäonnistui";

pub struct Confirmation<'a> {
    pub lead: &'a LeadCaptureState,
}

impl<'a> Confirmation<'a> {
    pub fn new(lead: &'a LeadCaptureState) -> Self {
        Self { lead }
    }

    /// Status lines below the heading, unwrapped.
    fn status_lines(&self) -> Vec<(String, Style)> {
        let muted = Style::default().fg(Color::DarkGray);
        let error = Style::default().fg(Color::Red);

        let mut lines = Vec::new();
        if self.lead.submitting {
            lines.push((SUBMITTING_TEXT.to_string(), muted));
        } else if self.lead.accepted {
            lines.push((ACCEPTED_TEXT.to_string(), Style::default().fg(Color::Green)));
        }
        for field_error in &self.lead.errors {
            lines.push((field_error.display_text(), error));
        }
        if let Some(failure) = &self.lead.failure {
            lines.push((format!("{FAILURE_PREFIX}: {failure}"), error));
        }
        lines
    }

    /// Rows needed at `width`, heading included.
    pub fn height(&self, width: u16) -> u16 {
        let width = usize::from(width.max(1));
        let wrapped = |text: &str| textwrap::wrap(text, width).len().max(1);

        let rows = wrapped(CONFIRMATION_HEADING)
            + self
                .status_lines()
                .iter()
                .map(|(text, _)| wrapped(text))
                .sum::<usize>();
        u16::try_from(rows).unwrap_or(u16::MAX)
    }
}

impl Component for Confirmation<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            CONFIRMATION_HEADING,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))];
        lines.extend(
            self.status_lines()
                .into_iter()
                .map(|(text, style)| Line::from(Span::styled(text, style))),
        );

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}
