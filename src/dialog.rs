//! Modal windows drawn on top of the table.
//!
//! Both kinds share the same geometry: a 5-row box, at most 60 columns wide,
//! centered on the parent surface.

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::jobs::JobQueue;
use crate::state::{DialogState, Direction};
use crate::surface::{clip_text, Attr, Surface, Window};

const BOX_HEIGHT: u16 = 5;
const MAX_BOX_WIDTH: u16 = 60;
/// Border plus one column of padding on each side.
const TEXT_INSET: u16 = 4;
const OPTION_GAP: u16 = 2;

/// Message shown once the user confirms a cancellation.
pub const CANCELED_MESSAGE: &str = "Job canceled";

/// `(height, width, top, left)` of a dialog box on a `rows` x `cols` surface.
pub fn centered_box(rows: u16, cols: u16) -> (u16, u16, u16, u16) {
    let width = MAX_BOX_WIDTH.min(cols.saturating_sub(4));
    let top = rows.saturating_sub(BOX_HEIGHT) / 2;
    let left = cols.saturating_sub(width) / 2;
    (BOX_HEIGHT, width, top, left)
}

/// Keys that commit a dialog choice: Enter, or its control-code forms.
pub fn is_commit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => true,
        KeyCode::Char('j') | KeyCode::Char('m') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// A window that renders into a centered, bordered box.
pub trait DialogWindow {
    /// Draw the interior of the box.
    fn draw_content(&self, surface: &mut dyn Surface, window: &Window);

    /// Open the box on `surface` and draw the content into it.
    fn open(&self, surface: &mut dyn Surface) -> Window {
        let (rows, cols) = surface.size();
        let (height, width, top, left) = centered_box(rows, cols);
        let window = surface.open_window(height, width, top, left);
        self.draw_content(surface, &window);
        window
    }
}

/// One-line message that waits for any key.
#[derive(Debug, Clone)]
pub struct Popup {
    message: String,
}

impl Popup {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Draw the popup, flush, and block until a key is pressed. The key is
    /// discarded.
    pub fn show(&self, surface: &mut dyn Surface) -> io::Result<()> {
        self.open(surface);
        surface.flush()?;
        surface.read_key()?;
        Ok(())
    }
}

impl DialogWindow for Popup {
    fn draw_content(&self, surface: &mut dyn Surface, window: &Window) {
        let max = window.width().saturating_sub(TEXT_INSET) as usize;
        surface.write_in(window, 2, 2, clip_text(&self.message, max), Attr::Plain);
    }
}

/// "Are you sure?" box guarding a job cancellation.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    job_id: String,
    job_name: String,
    state: DialogState,
}

impl ConfirmDialog {
    pub const OPTIONS: [&'static str; 2] = ["Yes", "No"];

    pub fn new(job_id: impl Into<String>, job_name: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            job_name: job_name.into(),
            state: DialogState::new(Self::OPTIONS.len()),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn question(&self) -> String {
        format!("Are you sure to cancel {} - {}?", self.job_id, self.job_name)
    }

    pub fn navigate(&mut self, direction: Direction) {
        self.state.navigate(direction);
    }

    fn draw_options(&self, surface: &mut dyn Surface, window: &Window) {
        let mut col = 2;
        for (i, option) in Self::OPTIONS.iter().enumerate() {
            let attr = if i == self.state.selected_option {
                Attr::Reverse
            } else {
                Attr::Plain
            };
            surface.write_in(window, 3, col, option, attr);
            col += option.len() as u16 + OPTION_GAP;
        }
    }

    /// Announce the cancellation, then run it.
    ///
    /// The popup goes up before the scheduler is called, so it reads the same
    /// whether or not the cancel succeeds. Returns whether the scheduler
    /// accepted the request.
    pub fn execute_cancel(
        &self,
        surface: &mut dyn Surface,
        queue: &mut dyn JobQueue,
    ) -> io::Result<bool> {
        Popup::new(CANCELED_MESSAGE).show(surface)?;
        match queue.cancel_job(&self.job_id) {
            Ok(()) => {
                log::info!("cancelled job {}", self.job_id);
                Ok(true)
            }
            Err(e) => {
                log::error!("error cancelling job {}: {}", self.job_id, e);
                Ok(false)
            }
        }
    }

    /// Run the dialog until the user commits. Returns `true` if "Yes" was
    /// chosen, in which case the job has been handed to the scheduler.
    pub fn show(&mut self, surface: &mut dyn Surface, queue: &mut dyn JobQueue) -> io::Result<bool> {
        self.state = DialogState::new(Self::OPTIONS.len());
        let window = self.open(surface);

        loop {
            surface.flush()?;
            let key = surface.read_key()?;

            if is_commit(&key) {
                let confirmed = self.state.commit();
                if confirmed {
                    self.execute_cancel(surface, queue)?;
                }
                return Ok(confirmed);
            }

            let direction = match key.code {
                KeyCode::Left => Some(Direction::Left),
                KeyCode::Right => Some(Direction::Right),
                _ => None,
            };
            if let Some(direction) = direction {
                self.navigate(direction);
                surface.clear_window(&window);
                self.draw_content(surface, &window);
            }
            surface.draw_border(&window);
        }
    }
}

impl DialogWindow for ConfirmDialog {
    fn draw_content(&self, surface: &mut dyn Surface, window: &Window) {
        let max = window.width().saturating_sub(TEXT_INSET) as usize;
        let question = self.question();
        surface.write_in(window, 2, 2, clip_text(&question, max), Attr::Plain);
        self.draw_options(surface, window);
    }
}
