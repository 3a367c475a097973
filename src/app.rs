//! The event loop.
//!
//! Every iteration re-fetches the job list, redraws, and then blocks on one
//! key. There is no timer: the table is only as fresh as the last key press.

use std::io;

use crate::dialog::{ConfirmDialog, Popup};
use crate::handlers::{self, KeyAction};
use crate::jobs::JobQueue;
use crate::render::TableView;
use crate::state::ViewportState;
use crate::surface::Surface;

/// Table view plus the selection state driving it.
#[derive(Debug, Default)]
pub struct App {
    table: TableView,
    viewport: ViewportState,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Run until the user quits.
    pub fn run(&mut self, surface: &mut dyn Surface, queue: &mut dyn JobQueue) -> io::Result<()> {
        while self.step(surface, queue)? {}
        log::info!("quit requested");
        Ok(())
    }

    /// One refresh/draw/key cycle. Returns `false` once the user quits.
    pub fn step(&mut self, surface: &mut dyn Surface, queue: &mut dyn JobQueue) -> io::Result<bool> {
        surface.clear()?;
        self.table.fetch(queue);

        let (rows, _) = surface.size();
        let visible_height = ViewportState::visible_height(rows);
        let row_count = self.table.data().row_count();
        self.viewport.clamp(row_count, visible_height);

        self.table.render(surface, &self.viewport);
        TableView::render_instructions_bar(surface);
        surface.flush()?;

        let key = surface.read_key()?;
        match handlers::handle_key(&key, &mut self.viewport, row_count, visible_height) {
            KeyAction::Quit => return Ok(false),
            KeyAction::CancelJob => {
                if let Some(job) = self.table.job_at(self.viewport.current_row) {
                    log::info!("cancel requested for job {} ({})", job.id, job.name);
                    let confirmed = ConfirmDialog::new(job.id, job.name).show(surface, queue)?;
                    log::debug!("cancel dialog closed, confirmed={}", confirmed);
                }
            }
            KeyAction::ShowInfo => {
                if let Some(job) = self.table.job_at(self.viewport.current_row) {
                    Popup::new(format!("Job {} - {}", job.id, job.name)).show(surface)?;
                }
            }
            KeyAction::None => {}
        }
        Ok(true)
    }
}
