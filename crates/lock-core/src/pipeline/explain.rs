use unicode_width::UnicodeWidthStr;

/// Every intermediate sequence of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTrace {
    pub row: String,
    pub row_known: bool,
    /// Text after the optional kanji step, before normalization.
    pub input: String,
    pub normalized: String,
    pub units: Vec<String>,
    pub romaji: Vec<String>,
    pub vowels: Vec<String>,
    /// Raw remapper output; empty when the row is unknown.
    pub remapped: Vec<String>,
    pub output: String,
}

impl StageTrace {
    /// Units that reached the output unchanged because no row syllable
    /// replaced them.
    pub fn passthrough_count(&self) -> usize {
        self.remapped.iter().filter(|s| s.is_empty()).count()
    }

    /// Render the trace as a column-aligned table, one column per unit.
    pub fn to_table(&self) -> String {
        let rows: [(&str, &[String]); 4] = [
            ("unit", &self.units),
            ("romaji", &self.romaji),
            ("vowel", &self.vowels),
            ("row", &self.remapped),
        ];
        let widths: Vec<usize> = (0..self.units.len())
            .map(|i| {
                rows.iter()
                    .filter_map(|(_, cells)| cells.get(i))
                    .map(|c| c.width())
                    .max()
                    .unwrap_or(0)
                    .max(1)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("row:        {}", self.row));
        if !self.row_known {
            out.push_str(" (unknown, output is empty)");
        }
        out.push('\n');
        out.push_str(&format!("input:      {}\n", self.input));
        out.push_str(&format!("normalized: {}\n", self.normalized));
        for (label, cells) in rows {
            out.push_str(&format!("{label:<8}  "));
            for (i, width) in widths.iter().enumerate() {
                let cell = cells.get(i).map(|s| s.as_str()).unwrap_or("");
                let cell = if cell.is_empty() { "·" } else { cell };
                out.push_str(cell);
                out.push_str(&" ".repeat(width.saturating_sub(cell.width()) + 1));
            }
            out.truncate(out.trim_end_matches(' ').len());
            out.push('\n');
        }
        out.push_str(&format!("output:     {}\n", self.output));
        out
    }
}
