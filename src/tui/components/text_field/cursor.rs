//! Cursor position tracking and navigation for `TextField`.
//!
//! `CursorState` owns the cursor byte offset, scroll offset, and cached width.
//! All navigation methods take `buffer: &str` explicitly; the text itself is
//! owned by `TextField`.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use super::text_wrap::{BORDER_OFFSET, display_width, inner_width, wrap_rows};

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible row (0 when content fits in the field)
    pub scroll_offset: u16,
    /// Area width from last render (used for vertical movement)
    pub last_area_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_area_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Row index and column (display cells) of the cursor.
    ///
    /// At a soft-wrap boundary the cursor belongs to the later row.
    pub fn row_col(&self, buffer: &str, area_width: u16) -> (u16, u16) {
        let rows = wrap_rows(buffer, inner_width(area_width));
        let row = rows
            .iter()
            .rposition(|r| r.start <= self.pos && self.pos <= r.end)
            .unwrap_or(0);
        let start = rows[row].start;
        (row as u16, display_width(&buffer[start..self.pos]))
    }

    /// Move cursor one row up (`-1`) or down (`1`), keeping the column when possible.
    ///
    /// Returns `true` if the cursor moved, `false` if already at the first/last row.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, area_width: u16) -> bool {
        let rows = wrap_rows(buffer, inner_width(area_width));
        let (row, col) = self.row_col(buffer, area_width);
        let row = usize::from(row);

        let target = if direction < 0 {
            let Some(target) = row.checked_sub(1) else {
                return false;
            };
            target
        } else {
            if row + 1 >= rows.len() {
                return false;
            }
            row + 1
        };

        // Walk the target row until the column is reached
        let span = rows[target].clone();
        let mut pos = span.start;
        let mut walked = 0u16;
        for (i, c) in buffer[span.clone()].char_indices() {
            let w = c.width().unwrap_or(0) as u16;
            if walked + w > col {
                break;
            }
            walked += w;
            pos = span.start + i + c.len_utf8();
        }
        self.pos = pos;
        true
    }

    /// Byte offset of the start of the cursor's logical line.
    pub fn line_start(&self, buffer: &str) -> usize {
        buffer[..self.pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// Byte offset of the end of the cursor's logical line.
    pub fn line_end(&self, buffer: &str) -> usize {
        buffer[self.pos..]
            .find('\n')
            .map(|i| self.pos + i)
            .unwrap_or(buffer.len())
    }

    /// Update scroll offset so the cursor row stays within `visible_rows`.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16, visible_rows: u16) {
        let total = wrap_rows(buffer, inner_width(area_width)).len() as u16;
        if total <= visible_rows {
            self.scroll_offset = 0;
            return;
        }

        let (row, _) = self.row_col(buffer, area_width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + visible_rows {
            self.scroll_offset = row + 1 - visible_rows;
        }
        self.scroll_offset = self.scroll_offset.min(total - visible_rows);
    }

    /// Screen position (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let (row, col) = self.row_col(buffer, area.width);
        let visible_row = row.saturating_sub(self.scroll_offset);
        (
            area.x + BORDER_OFFSET + col,
            area.y + BORDER_OFFSET + visible_row,
        )
    }
}
