//! UI helper functions

use ratatui::layout::Rect;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, HitTarget};
use crate::models::blocks::Block;
use crate::theme::{GREEN_DIM, TEXT_PRIMARY, TEXT_SECONDARY};

/// Simple text wrapping helper
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + 1 + word.chars().count() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Section heading line.
pub fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(GREEN_DIM).add_modifier(Modifier::BOLD),
    ))
}

/// One segment of a left-aligned line: text, style, and an optional
/// click target covering exactly that segment's columns.
pub type Segment = (String, Style, Option<HitTarget>);

/// Virtual line buffer for a scrollable screen.
///
/// Screens build their content as a run of lines, tagging interactive
/// lines or segments; `render` draws the visible window and registers a
/// hit rect for everything still on screen.
pub struct LineCanvas {
    lines: Vec<Line<'static>>,
    /// (line index, column offset, width, target); `u16::MAX` width
    /// means the full row.
    hits: Vec<(usize, u16, u16, HitTarget)>,
}

impl LineCanvas {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            hits: Vec::new(),
        }
    }

    /// Current line index (used to record scroll anchors).
    pub fn cursor(&self) -> usize {
        self.lines.len()
    }

    pub fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    /// A full-row click target. Only for left-aligned lines.
    pub fn push_hit(&mut self, line: Line<'static>, target: HitTarget) {
        self.hits.push((self.lines.len(), 0, u16::MAX, target));
        self.lines.push(line);
    }

    /// A left-aligned line assembled from segments, registering a
    /// column-accurate target for each tagged segment.
    pub fn push_segments(&mut self, segments: Vec<Segment>) {
        let line_index = self.lines.len();
        let mut spans = Vec::with_capacity(segments.len());
        let mut col: u16 = 0;
        for (text, style, target) in segments {
            let width = text.chars().count() as u16;
            if let Some(target) = target {
                self.hits.push((line_index, col, width, target));
            }
            col = col.saturating_add(width);
            spans.push(Span::styled(text, style));
        }
        self.lines.push(Line::from(spans));
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Wrap `text` into styled lines of at most `width` columns.
    pub fn push_wrapped(&mut self, text: &str, width: u16, style: Style) {
        for chunk in wrap_text(text, width.max(1) as usize) {
            self.lines.push(Line::from(Span::styled(chunk, style)));
        }
    }

    /// Total virtual height.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Draw the window at `scroll` and register visible hit regions.
    pub fn render(self, frame: &mut Frame<'_>, area: Rect, scroll: u16, app: &mut App) {
        for (line_index, col, width, target) in self.hits {
            let line_index = line_index as u16;
            if line_index < scroll || col >= area.width {
                continue;
            }
            let y = area.y + (line_index - scroll);
            if y >= area.y + area.height {
                continue;
            }
            let width = width.min(area.width - col).max(1);
            app.register_hit(Rect::new(area.x + col, y, width, 1), target);
        }

        let paragraph = Paragraph::new(self.lines).scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

/// Render a non-interactive content block into the canvas.
pub fn push_plain_block(canvas: &mut LineCanvas, block: &Block, width: u16) {
    match block {
        Block::Heading(text) => {
            canvas.push(heading(text));
        }
        Block::Paragraph(p) => {
            let style = if p.emphasis {
                Style::default()
                    .fg(TEXT_SECONDARY)
                    .add_modifier(Modifier::ITALIC)
            } else if p.bold_lead.is_some() {
                Style::default()
                    .fg(TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_PRIMARY)
            };
            canvas.push_wrapped(&p.text, width, style);
        }
        Block::List(items) => {
            for item in items {
                canvas.push_wrapped(
                    &format!("• {}", item),
                    width,
                    Style::default().fg(TEXT_PRIMARY),
                );
            }
        }
        Block::Table(table) => {
            canvas.push(Line::from(Span::styled(
                table.headers.join("  |  "),
                Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::BOLD),
            )));
            for row in &table.rows {
                canvas.push(Line::from(Span::styled(
                    row.join("  |  "),
                    Style::default().fg(TEXT_PRIMARY),
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_empty() {
        let result = wrap_text("", 10);
        assert_eq!(result, vec![""]);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        let result = wrap_text("hello world", 0);
        assert_eq!(result, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_fits_on_one_line() {
        let result = wrap_text("hello world", 20);
        assert_eq!(result, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_multiple_lines() {
        let result = wrap_text("hello world foo bar", 10);
        assert_eq!(result, vec!["hello", "world foo", "bar"]);
    }

    #[test]
    fn test_canvas_tracks_cursor_and_height() {
        let mut canvas = LineCanvas::new();
        assert_eq!(canvas.cursor(), 0);
        canvas.push(Line::raw("a"));
        canvas.blank();
        assert_eq!(canvas.cursor(), 2);
        assert_eq!(canvas.height(), 2);
    }
}
