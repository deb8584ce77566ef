//! Table recovery from OCR word positions.
//!
//! Rebuilds a grid from unstructured word observations. The algorithm:
//!
//! 1. Group words into lines by their `(block, par, line)` path
//! 2. Cluster every word's `left` edge into column bands (greedy 1-D)
//! 3. Assign each word to the nearest column center in its line's row
//! 4. Keep the grid only if two or more columns ever hold text
//!
//! Complexity: O(n log n) for the sort, O(n * C) for assignment where
//! C = detected columns.

use std::collections::HashMap;

use super::types::{Line, TableGrid, Word};

/// Group words into lines by exact `(block, par, line)` equality.
///
/// Words within a line are ordered by `left`. Lines are ordered by
/// `(min top, min left)` rather than by structural ids, which the
/// recognizer does not keep monotonic across blocks and paragraphs.
pub fn group_lines(words: &[Word]) -> Vec<Line> {
    let mut index: HashMap<(u32, u32, u32), usize> = HashMap::new();
    let mut lines: Vec<Line> = Vec::new();

    for word in words {
        let slot = *index.entry(word.line_key()).or_insert_with(|| {
            lines.push(Line { words: Vec::new() });
            lines.len() - 1
        });
        lines[slot].words.push(word.clone());
    }

    for line in &mut lines {
        line.words.sort_by_key(|w| w.left);
    }
    lines.sort_by_key(|line| (line.top(), line.left()));
    lines
}

/// Cluster word `left` edges into column centers.
///
/// Walks the globally sorted edges and starts a new cluster whenever the
/// next edge is more than `gap_px` past the previous one. Each center is
/// the integer mean of its members.
pub fn cluster_columns(words: &[Word], gap_px: i32) -> Vec<i32> {
    let mut edges: Vec<i32> = words.iter().map(|w| w.left).collect();
    edges.sort_unstable();

    let mut clusters: Vec<Vec<i32>> = Vec::new();
    for edge in edges {
        let starts_new = clusters
            .last()
            .and_then(|cluster| cluster.last())
            .map_or(true, |&prev| edge - prev > gap_px);
        if starts_new {
            clusters.push(vec![edge]);
        } else if let Some(cluster) = clusters.last_mut() {
            cluster.push(edge);
        }
    }

    clusters.iter().map(|c| integer_mean(c)).collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn integer_mean(values: &[i32]) -> i32 {
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    (sum / values.len() as i64) as i32
}

/// Index of the center closest to `left`; ties go to the lower index.
fn nearest_column(columns: &[i32], left: i32) -> Option<usize> {
    columns
        .iter()
        .enumerate()
        .min_by_key(|(_, &center)| (i64::from(center) - i64::from(left)).abs())
        .map(|(idx, _)| idx)
}

/// Assign each line's words to column cells.
///
/// Returns `None` when at most one column ever receives text: a single
/// populated column is prose, not a table.
pub fn build_table(lines: &[Line], columns: &[i32]) -> Option<TableGrid> {
    let mut rows = Vec::with_capacity(lines.len());
    let mut populated = vec![false; columns.len()];

    for line in lines {
        let mut row = vec![String::new(); columns.len()];
        for word in &line.words {
            let Some(col) = nearest_column(columns, word.left) else {
                continue;
            };
            let cell = &mut row[col];
            if !cell.is_empty() {
                cell.push(' ');
            }
            cell.push_str(&word.text);
            *cell = cell.trim().to_string();
            populated[col] |= !cell.is_empty();
        }
        rows.push(row);
    }

    if populated.iter().filter(|&&p| p).count() <= 1 {
        return None;
    }
    Some(TableGrid { rows })
}

impl TableGrid {
    /// Render as a GitHub-flavored markdown table.
    ///
    /// Rows shorter than the widest row are padded with empty cells. The
    /// first row becomes the header.
    pub fn to_markdown(&self) -> String {
        let col_count = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let Some(header) = self.rows.first() else {
            return String::new();
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_row(header, col_count));
        lines.push(format!("|{}", " --- |".repeat(col_count)));
        lines.extend(self.rows.iter().skip(1).map(|row| render_row(row, col_count)));
        lines.join("\n")
    }
}

fn render_row(row: &[String], col_count: usize) -> String {
    let mut line = String::from("|");
    for col in 0..col_count {
        let cell = row.get(col).map_or("", String::as_str);
        line.push_str(&format!(" {cell} |"));
    }
    line
}

/// Render an optional grid; no grid renders as the empty string.
pub fn render_markdown(grid: Option<&TableGrid>) -> String {
    grid.map(TableGrid::to_markdown).unwrap_or_default()
}

/// Full word-to-markdown pass used by the image pipeline.
pub fn words_to_markdown(words: &[Word], gap_px: i32) -> String {
    let lines = group_lines(words);
    let columns = cluster_columns(words, gap_px);
    render_markdown(build_table(&lines, &columns).as_ref())
}
