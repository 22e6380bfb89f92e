//! Boxed table rendering for listing results.

use console::measure_text_width;

/// A column-aligned table drawn with box characters.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl Table {
    /// Create a table with the given column headers.
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            widths,
        }
    }

    /// Append a row. Cells beyond the header count are dropped.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.truncate(self.headers.len());

        for (width, cell) in self.widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }

        self.rows.push(row);
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when no data rows were added.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table; the last line carries no trailing newline.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.line(&self.headers));
        lines.push(self.border('├', '┼', '┤'));
        lines.extend(self.rows.iter().map(|row| self.line(row)));
        lines.push(self.border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn line(&self, row: &[String]) -> String {
        let mut s = String::from("│");
        for (i, width) in self.widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(measure_text_width(cell));
            s.push(' ');
            s.push_str(cell);
            s.push_str(&" ".repeat(pad));
            s.push_str(" │");
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_still_renders_headers() {
        let table = Table::new(&["Name", "Python"]);
        assert!(table.is_empty());

        let output = table.render();
        assert!(output.contains("Name"));
        assert!(output.contains("Python"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn table_renders_environment_rows() {
        let mut table = Table::new(&["Name", "Python"]);
        table.add_row(["proj-a", "3.8.2"]);
        table.add_row(["longer-project", "3.11.4"]);

        insta::assert_snapshot!(table.render(), @r"
        ┌────────────────┬────────┐
        │ Name           │ Python │
        ├────────────────┼────────┤
        │ proj-a         │ 3.8.2  │
        │ longer-project │ 3.11.4 │
        └────────────────┴────────┘
        ");
    }

    #[test]
    fn missing_cells_are_blank() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.add_row(["only", "two"]);

        let output = table.render();
        assert!(output.contains("│ only │ two │   │"));
    }

    #[test]
    fn extra_cells_are_dropped() {
        let mut table = Table::new(&["A"]);
        table.add_row(["x", "ignored"]);

        assert!(!table.render().contains("ignored"));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let mut table = Table::new(&["Status"]);
        table.add_row(["✓"]);

        let lines: Vec<_> = table.render().lines().map(str::to_string).collect();
        let width = measure_text_width(&lines[0]);
        assert!(lines.iter().all(|l| measure_text_width(l) == width));
    }
}
