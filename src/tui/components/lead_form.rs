//! # LeadForm Component
//!
//! The input view: four text fields, the marketing consent checkbox and the
//! submit button, stacked vertically in tab order.
//!
//! `LeadFormState` persists across frames (field buffers, focus). `LeadForm`
//! is rebuilt every frame with the props it needs from `App`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::form::{FormDraft, FormField};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{TextField, TextFieldEvent};
use crate::tui::event::TuiEvent;

const SUBMIT_LABEL: &str = "Tee avainsanatutkimus";
const SUBMITTING_LABEL: &str = "Lähetetään...";
const REQUIRED_HINT: &str = "Pakollinen kenttä";
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 25;

/// What can hold keyboard focus, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(FormField),
    SubmitButton,
}

const FOCUS_ORDER: [FormFocus; 6] = [
    FormFocus::Field(FormField::CompanyName),
    FormFocus::Field(FormField::Email),
    FormFocus::Field(FormField::Services),
    FormFocus::Field(FormField::Guidelines),
    FormFocus::Field(FormField::CookieConsent),
    FormFocus::SubmitButton,
];

/// High-level events emitted by the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Edit(FormField, String),
    ToggleConsent,
    Submit,
}

pub struct LeadFormState {
    pub fields: Vec<TextField>,
    pub focus: FormFocus,
}

impl Default for LeadFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadFormState {
    pub fn new() -> Self {
        let mut state = Self {
            fields: FormField::ALL
                .into_iter()
                .filter(|f| *f != FormField::CookieConsent)
                .map(TextField::new)
                .collect(),
            focus: FOCUS_ORDER[0],
        };
        state.sync_focus();
        state
    }

    fn focus_index(&self) -> usize {
        FOCUS_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
    }

    pub fn focus_next(&mut self) {
        self.focus = FOCUS_ORDER[(self.focus_index() + 1) % FOCUS_ORDER.len()];
        self.sync_focus();
    }

    pub fn focus_prev(&mut self) {
        let len = FOCUS_ORDER.len();
        self.focus = FOCUS_ORDER[(self.focus_index() + len - 1) % len];
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        for field in &mut self.fields {
            field.focused = self.focus == FormFocus::Field(field.field);
        }
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        let FormFocus::Field(target) = self.focus else {
            return None;
        };
        self.fields.iter_mut().find(|f| f.field == target)
    }
}

impl EventHandler for LeadFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match (event, self.focus) {
            (TuiEvent::NextField, _) => {
                self.focus_next();
                None
            }
            (TuiEvent::PrevField, _) => {
                self.focus_prev();
                None
            }
            (TuiEvent::Submit, _) => Some(FormEvent::Submit),
            (
                TuiEvent::Enter | TuiEvent::InputChar(' '),
                FormFocus::Field(FormField::CookieConsent),
            ) => Some(FormEvent::ToggleConsent),
            (TuiEvent::Enter | TuiEvent::InputChar(' '), FormFocus::SubmitButton) => {
                Some(FormEvent::Submit)
            }
            (TuiEvent::CursorDown, FormFocus::Field(FormField::CookieConsent)) => {
                self.focus_next();
                None
            }
            (
                TuiEvent::CursorUp,
                FormFocus::Field(FormField::CookieConsent) | FormFocus::SubmitButton,
            ) => {
                self.focus_prev();
                None
            }
            _ => {
                let field = self.focused_field()?;
                let name = field.field;
                match field.handle_event(event)? {
                    TextFieldEvent::Changed(value) => Some(FormEvent::Edit(name, value)),
                    TextFieldEvent::Advance => {
                        self.focus_next();
                        None
                    }
                    TextFieldEvent::CursorMoved => None,
                }
            }
        }
    }
}

/// Props-based view over `LeadFormState`.
pub struct LeadForm<'a> {
    pub state: &'a mut LeadFormState,
    pub draft: &'a FormDraft,
    /// Lead capture in flight: the button renders disabled.
    pub submitting: bool,
    /// Mark empty required fields after a rejected submit.
    pub highlight_missing: bool,
}

impl LeadForm<'_> {
    fn render_consent(&self, frame: &mut Frame, area: Rect) {
        let focused = self.state.focus == FormFocus::Field(FormField::CookieConsent);
        let mark = if self.draft.cookie_consent { "[x]" } else { "[ ]" };
        let mark_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if self.highlight_missing && !self.draft.cookie_consent {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let line = Line::from(vec![
            Span::styled(format!("{mark} "), mark_style),
            Span::raw(FormField::CookieConsent.label()),
            Span::styled(" *", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
    }

    fn render_button(&self, frame: &mut Frame, area: Rect) {
        let focused = self.state.focus == FormFocus::SubmitButton;
        let (label, style) = if self.submitting {
            (
                SUBMITTING_LABEL,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        } else if focused {
            (
                SUBMIT_LABEL,
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            (SUBMIT_LABEL, Style::default().fg(Color::Yellow))
        };

        let button_area = Rect {
            width: BUTTON_WIDTH.min(area.width),
            ..area
        };
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::bordered().border_type(BorderType::Rounded).border_style(style));
        frame.render_widget(button, button_area);
    }
}

impl Component for LeadForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bottom = area.y + area.height;
        let mut y = area.y;
        let missing = if self.highlight_missing {
            self.draft.missing_fields()
        } else {
            Vec::new()
        };

        for field in &mut self.state.fields {
            field.errors = if missing.contains(&field.field) {
                vec![REQUIRED_HINT.to_string()]
            } else {
                Vec::new()
            };
            let height = field.height().min(bottom.saturating_sub(y));
            if height == 0 {
                return;
            }
            field.render(frame, Rect::new(area.x, y, area.width, height));
            y += height;
        }

        // Consent label wraps on narrow terminals
        let consent_width = area.width.max(1) as usize;
        let consent_text = 4 + FormField::CookieConsent.label().chars().count() + 2;
        let consent_height = consent_text.div_ceil(consent_width) as u16;
        let consent_area = Rect::new(area.x, y + 1, area.width, consent_height);
        if consent_area.bottom() > bottom {
            return;
        }
        self.render_consent(frame, consent_area);
        y = consent_area.bottom() + 1;

        let button_area = Rect::new(area.x, y, area.width, BUTTON_HEIGHT);
        if button_area.bottom() > bottom {
            return;
        }
        self.render_button(frame, button_area);
    }
}
