//! # Notice Overlay
//!
//! Blocking message box drawn over the form. The event loop swallows every
//! other key while it is visible; Enter, Esc or Space dismiss it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

const NOTICE_HINT: &str = " Enter: OK ";
const MAX_WIDTH: u16 = 60;
/// Borders plus horizontal padding
const HORIZONTAL_OVERHEAD: u16 = 4;

pub struct Notice<'a> {
    pub message: &'a str,
}

impl<'a> Notice<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Box centered in `outer`, sized to the wrapped message.
    fn overlay_area(&self, outer: Rect) -> Rect {
        let width = MAX_WIDTH.min(outer.width);
        let text_width = usize::from(width.saturating_sub(HORIZONTAL_OVERHEAD).max(1));
        let rows = textwrap::wrap(self.message, text_width).len().max(1);
        let height = (u16::try_from(rows).unwrap_or(u16::MAX) + 2).min(outer.height);

        let [_, center_v, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(outer);
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(center_v);
        center
    }
}

impl Component for Notice<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = self.overlay_area(area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title_bottom(Line::from(NOTICE_HINT).centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.message)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::INCOMPLETE_FORM_NOTICE;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn renders_message_and_hint_over_content() {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| {
                let background = Paragraph::new("x".repeat(80 * 12)).wrap(Wrap { trim: false });
                f.render_widget(background, f.area());
                Notice::new(INCOMPLETE_FORM_NOTICE).render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("hyväksy markkinointilupa"));
        assert!(text.contains("Enter: OK"));
    }

    #[test]
    fn overlay_is_centered_and_bounded() {
        let notice = Notice::new("lyhyt");
        let area = notice.overlay_area(Rect::new(0, 0, 100, 20));
        assert_eq!(area.width, MAX_WIDTH);
        assert_eq!(area.height, 3);
        assert_eq!(area.x, 20);

        let narrow = notice.overlay_area(Rect::new(0, 0, 30, 2));
        assert_eq!(narrow.width, 30);
        assert_eq!(narrow.height, 2);
    }
}
