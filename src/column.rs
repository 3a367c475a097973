//! Column width planning.
//!
//! Every column gets at least its natural width (the widest of its header
//! and cells). Whatever room is left on the line is shared out in
//! proportion to those natural widths.

use crate::parser::Dataset;

/// Display width of a cell or header.
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Allocated width per column, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidthPlan {
    columns: Vec<(String, usize)>,
}

impl ColumnWidthPlan {
    /// Width allocated to `column`, if it exists.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, width)| *width)
    }

    /// Widths in header order.
    pub fn widths(&self) -> Vec<usize> {
        self.columns.iter().map(|(_, w)| *w).collect()
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|(_, w)| w).sum()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.columns.iter().map(|(name, w)| (name.as_str(), *w))
    }
}

/// Natural width of each column: the widest of its header and all its cells.
pub fn natural_widths(data: &Dataset) -> Vec<usize> {
    let num_cols = data.headers.len();
    let mut widths = vec![0usize; num_cols];

    // Check header widths
    for (i, header) in data.headers.iter().enumerate() {
        widths[i] = widths[i].max(text_width(header));
    }

    // Check data row widths
    for row in &data.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < num_cols {
                widths[i] = widths[i].max(text_width(data.resolve(cell)));
            }
        }
    }

    widths
}

/// Fit the dataset's columns into `total_width` display columns.
///
/// Each column starts at its natural width. The spare room, after reserving
/// one column per header plus one, is split proportionally to the natural
/// widths; the remainder lost to integer division is left unused. When the
/// natural widths alone don't fit, the plan is just the natural widths and
/// the surface clips the overflow.
pub fn compute_column_widths(data: &Dataset, total_width: usize) -> ColumnWidthPlan {
    let mut widths = natural_widths(data);
    let used_space: usize = widths.iter().sum();
    let reserved = used_space + data.headers.len() + 1;
    let extra_space = total_width.saturating_sub(reserved);

    if used_space > 0 {
        for width in &mut widths {
            *width += extra_space * *width / used_space;
        }
    }

    ColumnWidthPlan {
        columns: data.headers.iter().cloned().zip(widths).collect(),
    }
}

/// Left-justify each cell to its planned width and concatenate.
///
/// Cells wider than their width are kept whole; only the surface clips.
pub fn format_row<'a>(cells: impl IntoIterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, &width) in cells.into_iter().zip(widths) {
        line.push_str(cell);
        let pad = width.saturating_sub(text_width(cell));
        line.extend(std::iter::repeat(' ').take(pad));
    }
    line
}
