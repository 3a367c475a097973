//! Table rendering for the terminal UI.
//!
//! Contains the table view that owns the current job snapshot and draws the
//! header, the visible slice of rows, and the instructions bar.

use crate::column::{compute_column_widths, format_row, ColumnWidthPlan};
use crate::jobs::JobQueue;
use crate::parser::Dataset;
use crate::state::ViewportState;
use crate::surface::{clip_text, Attr, Surface};

/// Help text on the bottom line.
pub const INSTRUCTIONS: &str = "Ctrl+K: Kill Job  |  Ctrl+R: Refresh |  Q: Quit";

/// Column holding the scheduler's job identifier.
pub const JOB_ID_COLUMN: &str = "JOBID";
/// Column holding the job name.
pub const JOB_NAME_COLUMN: &str = "NAME";

/// Identifier and name of the job under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedJob {
    pub id: String,
    pub name: String,
}

/// The job table and the snapshot it displays.
#[derive(Debug)]
pub struct TableView {
    data: Dataset,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl TableView {
    pub fn new() -> Self {
        Self {
            data: Dataset::empty(),
        }
    }

    pub fn with_data(data: Dataset) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Replace the snapshot with a fresh listing.
    ///
    /// On failure the previous snapshot is kept and `false` is returned. The
    /// viewport is left alone; the caller clamps it.
    pub fn fetch(&mut self, queue: &mut dyn JobQueue) -> bool {
        match queue.list_jobs() {
            Ok(data) => {
                self.data = data;
                true
            }
            Err(e) => {
                log::warn!("job listing failed, keeping previous snapshot: {}", e);
                false
            }
        }
    }

    pub fn column_widths(&self, total_width: usize) -> ColumnWidthPlan {
        compute_column_widths(&self.data, total_width)
    }

    /// Job id and name of row `idx`. `None` when the row doesn't exist or
    /// carries no job id.
    pub fn job_at(&self, idx: usize) -> Option<SelectedJob> {
        let row = self.data.row(idx)?;
        let id = row.get(JOB_ID_COLUMN).filter(|id| !id.is_empty())?;
        Some(SelectedJob {
            id: id.to_string(),
            name: row.get(JOB_NAME_COLUMN).unwrap_or_default().to_string(),
        })
    }

    /// Draw the header on row 0 and the visible rows below it, highlighting
    /// the selected one.
    ///
    /// Only a snapshot without a header draws nothing. A header-only listing
    /// (empty queue) still draws the header line.
    pub fn render(&self, surface: &mut dyn Surface, viewport: &ViewportState) {
        if self.data.headers.is_empty() {
            return;
        }

        let (rows, cols) = surface.size();
        let plan = self.column_widths(cols as usize);
        let widths = plan.widths();

        let header = format_row(self.data.headers.iter().map(String::as_str), &widths);
        surface.write(0, 0, &header, Attr::Plain);

        let visible_height = ViewportState::visible_height(rows);
        for (i, row) in self
            .data
            .rows
            .iter()
            .enumerate()
            .skip(viewport.top_row)
            .take(visible_height)
        {
            let line = format_row(row.iter().map(|cell| self.data.resolve(cell)), &widths);
            let attr = if i == viewport.current_row {
                Attr::Highlight
            } else {
                Attr::Plain
            };
            let screen_row = (i - viewport.top_row + 1) as u16;
            surface.write(screen_row, 0, &line, attr);
        }
    }

    /// Draw the help line on the last row.
    pub fn render_instructions_bar(surface: &mut dyn Surface) {
        let (rows, cols) = surface.size();
        if rows == 0 {
            return;
        }
        let text = clip_text(INSTRUCTIONS, cols as usize);
        surface.write(rows - 1, 0, text, Attr::Reverse);
    }
}
