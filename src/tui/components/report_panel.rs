//! # ReportPanel Component
//!
//! Scrollable view of the streamed keyword research report.
//!
//! ## Responsibilities
//!
//! - Render assistant content as markdown (user turns never reach this panel)
//! - Follow the bottom while streaming, until the user scrolls up
//! - Show a ⬇ indicator while content sits below the viewport
//! - Append the failure line under any partial report
//!
//! ## Architecture
//!
//! Same split as the other stateful components: `ReportPanelState` persists
//! in `TuiState` (scroll offset, pinning, last measured heights) and
//! `ReportPanel` is rebuilt every frame with the report text as a prop.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::ReportStatus;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

const PANEL_TITLE: &str = " Avainsanatutkimuksen tulokset ";
const INTRO: &str =
    "Tässä on tekoälyn luoma avainsanatutkimus, joka on laadittu täyttämäsi tietojen perusteella:";
const STREAMING_PLACEHOLDER: &str = "Luodaan avainsanatutkimusta...";
const FAILURE_PREFIX: &str = "Avainsanatutkimuksen luonti epäonnistui";
const MORE_BELOW: &str = " ⬇ ";

pub struct ReportPanelState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Viewport height from the last render
    pub viewport_height: u16,
    /// Wrapped content height from the last render
    pub content_height: u16,
}

impl Default for ReportPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPanelState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Keep the offset inside the content.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        if self.scroll_state.offset().y > max_y {
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        if self.scroll_state.offset().y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_state.set_offset(Position {
            x: 0,
            y: self.max_offset(),
        });
    }

    pub fn has_content_below(&self) -> bool {
        self.scroll_state.offset().y < self.max_offset()
    }
}

impl EventHandler for ReportPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::CursorHome => {
                self.scroll_state.scroll_to_top();
                self.stick_to_bottom = false;
            }
            TuiEvent::CursorEnd => self.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

pub struct ReportPanel<'a> {
    pub state: &'a mut ReportPanelState,
    /// Assistant content only.
    pub content: &'a str,
    pub status: &'a ReportStatus,
}

impl ReportPanel<'_> {
    fn body(&self) -> Text<'static> {
        let mut text = Text::from(vec![Line::from(INTRO), Line::default()]);
        text.lines.extend(markdown::render(self.content, Color::Reset).lines);

        if self.content.trim().is_empty() && *self.status == ReportStatus::Streaming {
            text.lines.push(Line::from(Span::styled(
                STREAMING_PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        if let ReportStatus::Failed(reason) = self.status {
            if !text.lines.is_empty() {
                text.lines.push(Line::default());
            }
            text.lines.push(Line::from(Span::styled(
                format!("{FAILURE_PREFIX}: {reason}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        text
    }
}

impl Component for ReportPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = match self.status {
            ReportStatus::Failed(_) => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::DarkGray),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(PANEL_TITLE, Style::default().fg(Color::Yellow)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // -1 for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        if content_width == 0 || inner.height == 0 {
            return;
        }

        let paragraph = Paragraph::new(self.body()).wrap(Wrap { trim: false });
        let content_height = u16::try_from(paragraph.line_count(content_width)).unwrap_or(u16::MAX);

        self.state.viewport_height = inner.height;
        self.state.content_height = content_height;
        if self.state.stick_to_bottom {
            self.state.scroll_to_bottom();
        } else {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);

        if self.state.has_content_below() && area.width > 6 {
            let indicator = Rect::new(area.right() - 5, area.bottom() - 1, 3, 1);
            frame.render_widget(
                Span::styled(MORE_BELOW, Style::default().fg(Color::Yellow)),
                indicator,
            );
        }
    }
}
