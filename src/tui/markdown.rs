//! Markdown → ratatui `Text` renderer for the keyword report.
//!
//! Walks `pulldown_cmark` events and emits styled `Line`/`Span` values.
//! Handles what report-style replies use: headings, paragraphs, bold, italic,
//! inline code, lists, block quotes, rules, links, fenced code and tables.
//! Tables are buffered until they close so columns can be padded to a common
//! display width.

use pulldown_cmark::{Alignment, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

/// Parse markdown content into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.text
}

/// A table being collected row by row.
#[derive(Default)]
struct TableBuffer {
    alignments: Vec<Alignment>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
    current_cell: String,
}

impl TableBuffer {
    fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);
        (0..columns)
            .map(|col| {
                std::iter::once(&self.header)
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn pad_cell(cell: &str, width: usize, alignment: Alignment) -> String {
    let gap = width.saturating_sub(cell.width());
    match alignment {
        Alignment::Right => format!("{}{cell}", " ".repeat(gap)),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{cell}{}", " ".repeat(left), " ".repeat(gap - left))
        }
        Alignment::Left | Alignment::None => format!("{cell}{}", " ".repeat(gap)),
    }
}

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack. Styles compose via `patch` so bold+italic nests.
    styles: Vec<Style>,
    /// Per-line prefix spans (block quote `│`, code block `│`).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Set right after a list marker so a loose item's paragraph stays on the marker line.
    at_item_start: bool,
    in_code_block: bool,
    table: Option<TableBuffer>,
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            at_item_start: false,
            in_code_block: false,
            table: None,
            link_url: None,
            needs_newline: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        // Inside a table every inline event is flattened into the current cell
        if let Some(table) = self.table.as_mut() {
            match event {
                Event::Text(t) | Event::Code(t) => {
                    table.current_cell.push_str(&t);
                    return;
                }
                Event::SoftBreak | Event::HardBreak => {
                    table.current_cell.push(' ');
                    return;
                }
                Event::End(TagEnd::TableHead) => {
                    table.header = std::mem::take(&mut table.current_row);
                    return;
                }
                Event::End(TagEnd::TableRow) => {
                    let row = std::mem::take(&mut table.current_row);
                    table.rows.push(row);
                    return;
                }
                Event::End(TagEnd::TableCell) => {
                    let cell = std::mem::take(&mut table.current_cell);
                    table.current_row.push(cell.trim().to_string());
                    return;
                }
                Event::End(TagEnd::Table) => {}
                _ => return,
            }
        }

        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            _ => {} // HTML, footnotes, math
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if std::mem::take(&mut self.at_item_start) {
                    return;
                }
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
                self.push_style(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(_) => {
                self.blank_line_if_needed();
                let bs = Style::default().fg(Color::DarkGray);
                self.push_line(Line::from(Span::styled("╭──", bs)));
                self.line_prefixes.push(Span::styled("│ ", bs));
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let indent = "  ".repeat(self.list_indices.len().saturating_sub(1));
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}• "),
                        Some(n) => {
                            let s = format!("{indent}{n}. ");
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::Cyan)));
                }
                self.at_item_start = true;
            }
            Tag::Table(alignments) => {
                self.blank_line_if_needed();
                self.table = Some(TableBuffer {
                    alignments,
                    ..Default::default()
                });
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.line_prefixes.pop();
                self.push_line(Line::from(Span::styled(
                    "╰──",
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.flush_table(table);
                }
                self.needs_newline = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui renders \t as zero-width
        let text = cow.replace('\t', "    ");

        if self.in_code_block {
            let code_style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.push_line(Line::from(Span::styled(line.to_owned(), code_style)));
            }
            return;
        }

        self.at_item_start = false;
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }

    fn flush_table(&mut self, table: TableBuffer) {
        let widths = table.column_widths();
        let border = Style::default().fg(Color::DarkGray);
        let header_style = Style::default().fg(self.base_fg).add_modifier(Modifier::BOLD);
        let cell_style = Style::default().fg(self.base_fg);

        let row_line = |cells: &[String], style: Style| -> Line<'static> {
            let mut spans = vec![Span::styled("│ ", border)];
            for (col, width) in widths.iter().enumerate() {
                let cell = cells.get(col).map(String::as_str).unwrap_or("");
                let alignment = table.alignments.get(col).copied().unwrap_or(Alignment::None);
                spans.push(Span::styled(pad_cell(cell, *width, alignment), style));
                spans.push(Span::styled(" │ ", border));
            }
            if let Some(last) = spans.last_mut() {
                *last = Span::styled(" │", border);
            }
            Line::from(spans)
        };

        if !table.header.is_empty() {
            self.push_line(row_line(&table.header, header_style));
            let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            self.push_line(Line::from(Span::styled(
                format!("├─{}─┤", rule.join("─┼─")),
                border,
            )));
        }
        for row in &table.rows {
            self.push_line(row_line(row, cell_style));
        }
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD),
    }
}
