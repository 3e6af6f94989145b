//! # TextField Component
//!
//! One labelled, bordered text control of the lead form.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste, and editing keys (backspace, delete, arrows, Home/End)
//! - Single-line fields treat Enter as "next field"; multi-line fields insert a newline
//! - Render the label, a placeholder while empty, and the cursor when focused
//!
//! ## State Management
//!
//! The buffer is internal state and mirrors the core `FormDraft` value. Every
//! edit is reported as `TextFieldEvent::Changed` so the parent can dispatch
//! `Action::EditField`. Cursor position and scroll live in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::form::FormField;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary, wrap_rows};

/// Visible rows for multi-line fields before internal scrolling kicks in
const MULTILINE_ROWS: u16 = 4;

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq)]
pub enum TextFieldEvent {
    /// The buffer changed; carries the full new value.
    Changed(String),
    /// The user asked to leave the field (Enter on a single-line field).
    Advance,
    /// Cursor moved without changing the text.
    CursorMoved,
}

pub struct TextField {
    pub field: FormField,
    pub buffer: String,
    /// Prop: whether this field has keyboard focus
    pub focused: bool,
    /// Prop: endpoint validation messages for this field
    pub errors: Vec<String>,
    cursor: CursorState,
}

impl TextField {
    pub fn new(field: FormField) -> Self {
        Self {
            field,
            buffer: String::new(),
            focused: false,
            errors: Vec::new(),
            cursor: CursorState::new(),
        }
    }

    fn visible_rows(&self) -> u16 {
        if self.field.is_multiline() {
            MULTILINE_ROWS
        } else {
            1
        }
    }

    /// Rows this field occupies, including borders and one row per error.
    pub fn height(&self) -> u16 {
        self.visible_rows() + VERTICAL_OVERHEAD + self.errors.len() as u16
    }

    fn insert(&mut self, text: &str) -> Option<TextFieldEvent> {
        let text = if self.field.is_multiline() {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text.replace("\r\n", " ").replace(['\r', '\n'], " ")
        };
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
        Some(TextFieldEvent::Changed(self.buffer.clone()))
    }

    fn move_to(&mut self, pos: usize) -> Option<TextFieldEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            TextFieldEvent::CursorMoved
        })
    }

    fn title(&self) -> String {
        if self.field.is_required() {
            format!(" {} * ", self.field.label())
        } else {
            format!(" {} ", self.field.label())
        }
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = self.visible_rows();
        let box_area = Rect {
            height: (rows + VERTICAL_OVERHEAD).min(area.height),
            ..area
        };

        self.cursor.last_area_width = box_area.width;
        self.cursor
            .update_scroll_offset(&self.buffer, box_area.width, rows);

        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else if !self.errors.is_empty() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(self.title(), border_style));

        let lines: Vec<Line> = if self.buffer.is_empty() {
            vec![Line::from(Span::styled(
                self.field.placeholder(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))]
        } else {
            wrap_rows(&self.buffer, inner_width(box_area.width))
                .into_iter()
                .skip(self.cursor.scroll_offset as usize)
                .take(rows as usize)
                .map(|span| Line::raw(&self.buffer[span]))
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), box_area);

        for (i, error) in self.errors.iter().enumerate() {
            let y = box_area.y + box_area.height + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let error_area = Rect::new(area.x + 1, y, area.width.saturating_sub(1), 1);
            frame.render_widget(
                Span::styled(error.as_str(), Style::default().fg(Color::Red)),
                error_area,
            );
        }

        if self.focused {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, box_area));
        }
    }
}

impl EventHandler for TextField {
    type Event = TextFieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('\n') | TuiEvent::Enter if self.field.is_multiline() => {
                self.insert("\n")
            }
            TuiEvent::InputChar('\n') | TuiEvent::Enter => Some(TextFieldEvent::Advance),
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(TextFieldEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(TextFieldEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::CursorLeft if self.cursor.pos > 0 => {
                self.move_to(prev_char_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::CursorRight if self.cursor.pos < self.buffer.len() => {
                self.move_to(next_char_boundary(&self.buffer, self.cursor.pos))
            }
            TuiEvent::CursorHome => self.move_to(self.cursor.line_start(&self.buffer)),
            TuiEvent::CursorEnd => self.move_to(self.cursor.line_end(&self.buffer)),
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_area_width)
                .then_some(TextFieldEvent::CursorMoved),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_area_width)
                .then_some(TextFieldEvent::CursorMoved),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(field: &mut TextField, text: &str) {
        for c in text.chars() {
            field.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_reports_full_value() {
        let mut field = TextField::new(FormField::CompanyName);
        type_str(&mut field, "Acm");
        let event = field.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(event, Some(TextFieldEvent::Changed("Acme".to_string())));
    }

    #[test]
    fn backspace_handles_multibyte() {
        let mut field = TextField::new(FormField::CompanyName);
        type_str(&mut field, "Kää");
        let event = field.handle_event(&TuiEvent::Backspace);
        assert_eq!(event, Some(TextFieldEvent::Changed("Kä".to_string())));
        assert_eq!(field.handle_event(&TuiEvent::CursorLeft), Some(TextFieldEvent::CursorMoved));
        assert_eq!(
            field.handle_event(&TuiEvent::Delete),
            Some(TextFieldEvent::Changed("K".to_string()))
        );
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut field = TextField::new(FormField::Email);
        assert_eq!(field.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn enter_advances_single_line_field() {
        let mut field = TextField::new(FormField::Email);
        type_str(&mut field, "a@b.com");
        assert_eq!(field.handle_event(&TuiEvent::Enter), Some(TextFieldEvent::Advance));
        assert_eq!(field.buffer, "a@b.com");
    }

    #[test]
    fn enter_inserts_newline_in_multiline_field() {
        let mut field = TextField::new(FormField::Services);
        type_str(&mut field, "Web design");
        field.handle_event(&TuiEvent::Enter);
        type_str(&mut field, "SEO");
        assert_eq!(field.buffer, "Web design\nSEO");
    }

    #[test]
    fn paste_flattens_newlines_in_single_line_field() {
        let mut field = TextField::new(FormField::CompanyName);
        field.handle_event(&TuiEvent::Paste("Acme\r\nOy".to_string()));
        assert_eq!(field.buffer, "Acme Oy");

        let mut services = TextField::new(FormField::Services);
        services.handle_event(&TuiEvent::Paste("A\r\nB".to_string()));
        assert_eq!(services.buffer, "A\nB");
    }

    #[test]
    fn paste_normalizes_bare_carriage_returns() {
        let mut field = TextField::new(FormField::CompanyName);
        field.handle_event(&TuiEvent::Paste("Acme\rOy".to_string()));
        assert_eq!(field.buffer, "Acme Oy");

        let mut services = TextField::new(FormField::Services);
        services.handle_event(&TuiEvent::Paste("Web design\rSEO\r".to_string()));
        assert_eq!(services.buffer, "Web design\nSEO\n");
    }

    #[test]
    fn home_and_end_stay_on_logical_line() {
        let mut field = TextField::new(FormField::Services);
        field.handle_event(&TuiEvent::Paste("Web design\nSEO".to_string()));
        field.handle_event(&TuiEvent::CursorHome);
        field.handle_event(&TuiEvent::InputChar('-'));
        assert_eq!(field.buffer, "Web design\n-SEO");
        field.handle_event(&TuiEvent::CursorUp);
        field.handle_event(&TuiEvent::CursorEnd);
        field.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(field.buffer, "Web design!\n-SEO");
    }

    #[test]
    fn height_grows_with_errors() {
        let mut field = TextField::new(FormField::Email);
        assert_eq!(field.height(), 3);
        field.errors.push("Sähköposti: should be an email".to_string());
        assert_eq!(field.height(), 4);

        let services = TextField::new(FormField::Services);
        assert_eq!(services.height(), MULTILINE_ROWS + 2);
    }

    #[test]
    fn render_shows_label_and_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(50, 6)).unwrap();
        let mut field = TextField::new(FormField::Guidelines);
        terminal.draw(|f| field.render(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Tarkennukset"));
        assert!(text.contains("Esim. Toimialue Satakunta"));
    }

    #[test]
    fn render_shows_buffer_instead_of_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(50, 6)).unwrap();
        let mut field = TextField::new(FormField::Guidelines);
        field.handle_event(&TuiEvent::Paste("Region: South
B2B only".to_string()));
        field.focused = true;
        terminal.draw(|f| field.render(f, f.area())).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Region: South"));
        assert!(text.contains("B2B only"));
        assert!(!text.contains("Esim. Toimialue"));
    }
}
