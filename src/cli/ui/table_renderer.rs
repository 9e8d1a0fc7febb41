use crate::cli::output::current_preferences;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Header and width constraints for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            max_width: None,
            alignment,
        }
    }

    pub fn min(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    pub fn max(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Plain-text table. Cells may carry ANSI styling; widths are measured on the
/// visible characters only.
#[derive(Clone, Debug)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub show_headers: bool,
    pub padding: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            show_headers: true,
            padding: 1,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .max()
                    .unwrap_or(0);
                let width = content
                    .max(visible_width(&column.header))
                    .max(column.min_width);
                match column.max_width {
                    Some(max) => width.min(max),
                    None => width,
                }
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment, self.padding)
            })
            .collect();
        cells.join(" ").trim_end().to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        if self.show_headers {
            let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
            lines.push(self.render_row(&header, &widths));
            lines.push(horizontal_rule(&widths, self.padding));
        }
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines.join("\n")
    }
}

/// Length of the escape sequence starting at `bytes[idx]`, or 0 when there is
/// none.
fn escape_len(bytes: &[u8], idx: usize) -> usize {
    if bytes.get(idx) != Some(&0x1b) {
        return 0;
    }
    let mut end = idx + 1;
    if bytes.get(end) == Some(&b'[') {
        end += 1;
        while let Some(byte) = bytes.get(end) {
            end += 1;
            if (0x40..=0x7E).contains(byte) {
                break;
            }
        }
    }
    end - idx
}

pub fn visible_width(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut idx = 0;
    let mut width = 0;
    while idx < bytes.len() {
        let skip = escape_len(bytes, idx);
        if skip > 0 {
            idx += skip;
            continue;
        }
        match text[idx..].chars().next() {
            Some(ch) => {
                width += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }
    width
}

/// Cuts `text` to `width` visible characters, ending in `…` when shortened.
pub fn truncate_text(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let keep = width - 1;
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut idx = 0;
    let mut visible = 0;
    let mut styled = false;

    while idx < bytes.len() && visible < keep {
        let skip = escape_len(bytes, idx);
        if skip > 0 {
            out.push_str(&text[idx..idx + skip]);
            idx += skip;
            styled = true;
            continue;
        }
        match text[idx..].chars().next() {
            Some(ch) => {
                out.push(ch);
                visible += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }

    out.push('…');
    if styled {
        out.push_str("\u{1b}[0m");
    }
    out
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let fitted = truncate_text(text, width);
    let fill = " ".repeat(width.saturating_sub(visible_width(&fitted)));
    let pad = " ".repeat(padding);
    match alignment {
        Alignment::Left => format!("{pad}{fitted}{fill}{pad}"),
        Alignment::Right => format!("{pad}{fill}{fitted}{pad}"),
    }
}

/// A rule spanning all columns, drawn in ASCII under plain output.
pub fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    if widths.is_empty() {
        return String::new();
    }
    let total: usize =
        widths.iter().map(|w| w + padding * 2).sum::<usize>() + widths.len().saturating_sub(1);
    let ch = if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    };
    ch.to_string().repeat(total)
}
