use super::view_model::ViewModel;
use crate::controller::Mode;
use crossterm::style::Stylize;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub mode: Mode,
    pub focused: bool,
    pub placeholder: &'a str,
}

/// Turns a buffer into the text block a host draws.
///
/// Width and height of 0 mean "unbounded". `max_height` caps the visible
/// rows regardless of the height the host offers.
#[derive(Debug, Clone)]
pub struct View {
    width: usize,
    height: usize,
    max_height: usize,
    scroll_offset: usize,
    horizontal_scroll: usize,
    tab_stop: usize,
}

impl View {
    pub fn new(max_height: usize) -> Self {
        Self {
            width: 0,
            height: 0,
            max_height,
            scroll_offset: 0,
            horizontal_scroll: 0,
            tab_stop: 4,
        }
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn visible_lines(&self) -> usize {
        match (self.height, self.max_height) {
            (0, 0) => usize::MAX,
            (0, max) => max,
            (height, 0) => height,
            (height, max) => height.min(max),
        }
    }

    fn text_width(&self) -> usize {
        if self.width == 0 { usize::MAX } else { self.width }
    }

    /// Scroll just enough to keep the cursor cell visible.
    pub fn adjust_scroll_to_cursor(&mut self, view_model: &dyn ViewModel) {
        let cursor = view_model.get_cursor_position();
        let visible_lines = self.visible_lines();

        if cursor.line < self.scroll_offset {
            self.scroll_offset = cursor.line;
        } else if cursor.line >= self.scroll_offset.saturating_add(visible_lines) {
            self.scroll_offset = cursor.line + 1 - visible_lines;
        }

        let line = view_model.get_line(cursor.line).unwrap_or_default();
        let column = self.calculate_display_column(line, cursor.column);
        let width = self.text_width();
        if column < self.horizontal_scroll {
            self.horizontal_scroll = column;
        } else if column >= self.horizontal_scroll.saturating_add(width) {
            self.horizontal_scroll = column + 1 - width;
        }
    }

    pub fn render(&self, view_model: &dyn ViewModel, params: &RenderParams) -> String {
        let cursor = view_model.get_cursor_position();

        if view_model.is_empty() && !params.placeholder.is_empty() {
            let placeholder = self.clip(params.placeholder);
            return if params.focused {
                format!("{}{}", " ".reverse(), placeholder.dim())
            } else {
                format!("{}", placeholder.dim())
            };
        }

        let end = view_model
            .get_line_count()
            .min(self.scroll_offset.saturating_add(self.visible_lines()));
        let mut rows = Vec::with_capacity(end.saturating_sub(self.scroll_offset));
        for line_idx in self.scroll_offset..end {
            let line = view_model.get_line(line_idx).unwrap_or_default();
            let cursor_col = (params.focused && line_idx == cursor.line).then_some(cursor.column);
            rows.push(self.render_line(line, cursor_col, params.mode));
        }
        rows.join("\n")
    }

    fn clip(&self, text: &str) -> String {
        let width = self.text_width();
        let mut used = 0;
        text.chars()
            .take_while(|c| {
                used += c.width().unwrap_or(0);
                used <= width
            })
            .collect()
    }

    fn render_line(&self, line: &str, cursor_col: Option<usize>, mode: Mode) -> String {
        let width = self.text_width();
        let right_edge = self.horizontal_scroll.saturating_add(width);
        let mut result = String::new();
        let mut display_col = 0;

        for (i, ch) in line.chars().enumerate() {
            let (cell, cell_width) = match ch {
                '\t' => {
                    let next_stop = ((display_col / self.tab_stop) + 1) * self.tab_stop;
                    (" ".repeat(next_stop - display_col), next_stop - display_col)
                }
                c => (c.to_string(), c.width().unwrap_or(0)),
            };
            let start = display_col;
            display_col += cell_width;
            if start < self.horizontal_scroll {
                continue;
            }
            if display_col > right_edge {
                break;
            }
            if cursor_col == Some(i) {
                result.push_str(&Self::cursor_cell(&cell, mode));
            } else {
                result.push_str(&cell);
            }
        }

        let line_len = line.chars().count();
        if cursor_col.is_some_and(|col| col >= line_len) && display_col < right_edge {
            result.push_str(&Self::cursor_cell(" ", mode));
        }
        result
    }

    fn cursor_cell(cell: &str, mode: Mode) -> String {
        match mode {
            Mode::Normal => format!("{}", cell.reverse()),
            Mode::Insert => format!("{}", cell.underlined()),
        }
    }

    /// Convert logical character position to display column position
    /// Accounts for tab expansion and Unicode character widths
    fn calculate_display_column(&self, text: &str, logical_pos: usize) -> usize {
        let mut display_col = 0;
        for c in text.chars().take(logical_pos) {
            match c {
                '\t' => display_col = ((display_col / self.tab_stop) + 1) * self.tab_stop,
                c => display_col += c.width().unwrap_or(1),
            }
        }
        display_col
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(0)
    }
}
