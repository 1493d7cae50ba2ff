//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured on visible characters, so cells may carry ANSI colors.

use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ansi regex is valid"));

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

fn visible_len(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

pub struct Column {
    pub header: String,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            max_width: None,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: '-',
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| visible_len(c))
                    .max()
                    .unwrap_or(0);
                let w = content.max(col.header.chars().count());
                col.max_width.map_or(w, |m| w.min(m))
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&format!("{:<w$}  ", col.header, w = *w));
        }
        let header_len = out.trim_end().chars().count();
        out = out.trim_end().to_string();
        out.push('\n');
        out.push_str(&self.separator.to_string().repeat(header_len));
        out.push('\n');

        for row in &self.rows {
            let mut line = String::new();
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = w.saturating_sub(visible_len(cell));
                line.push_str(cell);
                line.push_str(&" ".repeat(pad + 2));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_size_to_widest_visible_cell() {
        let mut t = Table::new(vec![Column::new("ID"), Column::new("Outcome")]);
        t.add_row(vec!["1".into(), "\x1b[32mAll Good\x1b[0m".into()]);
        t.add_row(vec!["12".into(), "No Access".into()]);

        let rendered = t.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID  Outcome");
        assert_eq!(lines[1], "-----------");
        assert_eq!(strip_ansi(lines[2]), "1   All Good");
        assert_eq!(lines[3], "12  No Access");
    }
}
