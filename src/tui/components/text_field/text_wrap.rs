//! Pure layout helpers and dimensional constants for `TextField`.
//!
//! Rows are computed as byte ranges into the buffer so the renderer and the
//! cursor math always agree on where a row starts and ends.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Left + right border, plus one column kept free for the cursor at row end
pub(super) const HORIZONTAL_OVERHEAD: u16 = 3;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// Calculate the inner content width after subtracting border overhead.
/// Returns 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Byte ranges of the visual rows `text` occupies at `width` columns.
///
/// Logical lines split on `\n` (the newline itself belongs to no row).
/// Lines wider than `width` break at the column limit. Always returns at
/// least one row.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width);
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let mut row_start = line_start;
        let mut col = 0;
        if width > 0 {
            for (i, c) in line.char_indices() {
                let w = c.width().unwrap_or(0);
                if col + w > width && col > 0 {
                    rows.push(row_start..line_start + i);
                    row_start = line_start + i;
                    col = 0;
                }
                col += w;
            }
        }
        rows.push(row_start..line_start + line.len());
        line_start += line.len() + 1;
    }

    rows
}

/// Display width of `text`.
pub(super) fn display_width(text: &str) -> u16 {
    text.chars()
        .map(|c| c.width().unwrap_or(0) as u16)
        .sum()
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_empty_row() {
        assert_eq!(wrap_rows("", 10), vec![0..0]);
    }

    #[test]
    fn short_line_fits() {
        assert_eq!(wrap_rows("Acme", 10), vec![0..4]);
    }

    #[test]
    fn long_line_breaks_at_width() {
        assert_eq!(wrap_rows("aaaaaaaaaa", 4), vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn newlines_start_rows() {
        // "Web design\nSEO" — the newline at byte 10 belongs to no row
        assert_eq!(wrap_rows("Web design\nSEO", 20), vec![0..10, 11..14]);
    }

    #[test]
    fn trailing_newline_adds_empty_row() {
        assert_eq!(wrap_rows("SEO\n", 20), vec![0..3, 4..4]);
    }

    #[test]
    fn wide_chars_count_double() {
        // Each CJK char is two columns wide
        assert_eq!(wrap_rows("日本語", 4), vec![0..6, 6..9]);
    }

    #[test]
    fn zero_width_keeps_logical_lines() {
        assert_eq!(wrap_rows("ab\ncd", 0), vec![0..2, 3..5]);
    }

    #[test]
    fn multibyte_boundaries() {
        let s = "Sähkö";
        assert_eq!(next_char_boundary(s, 1), 3);
        assert_eq!(prev_char_boundary(s, 3), 1);
        assert_eq!(prev_char_boundary(s, s.len()), 5);
        assert_eq!(next_char_boundary(s, 5), s.len());
        assert_eq!(display_width(s), 5);
    }
}
