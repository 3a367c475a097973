//! Headless doubles for the surface and the scheduler, used by the tests and
//! benchmarks.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, style::Modifier};

use crate::error::JobError;
use crate::jobs::JobQueue;
use crate::parser::{self, Dataset};
use crate::surface::{Attr, Surface};

/// In-memory surface with a scripted key queue.
///
/// Every `flush` records a text snapshot of the screen in `frames`. Reading
/// past the end of the script fails with `UnexpectedEof`.
pub struct MemorySurface {
    buffer: Buffer,
    keys: VecDeque<KeyEvent>,
    pub frames: Vec<Vec<String>>,
    pub clears: usize,
    pub keys_read: usize,
}

impl MemorySurface {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, cols, rows)),
            keys: VecDeque::new(),
            frames: Vec::new(),
            clears: 0,
            keys_read: 0,
        }
    }

    pub fn with_keys(rows: u16, cols: u16, keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        let mut surface = Self::new(rows, cols);
        surface.keys.extend(keys);
        surface
    }

    pub fn push_key(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Text of `row` with trailing blanks removed.
    pub fn line(&self, row: u16) -> String {
        let area = self.buffer.area;
        let text: String = (area.left()..area.right())
            .filter_map(|x| self.buffer.cell((x, row)))
            .map(|cell| cell.symbol())
            .collect();
        text.trim_end().to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.buffer.area.height).map(|row| self.line(row)).collect()
    }

    pub fn attr_at(&self, row: u16, col: u16) -> Attr {
        match self.buffer.cell((col, row)) {
            Some(cell) if cell.modifier.contains(Modifier::REVERSED) => Attr::Reverse,
            Some(cell) if cell.fg == Color::Red => Attr::Highlight,
            _ => Attr::Plain,
        }
    }

    /// Whether any flushed frame contained `needle`.
    pub fn showed(&self, needle: &str) -> bool {
        self.frames
            .iter()
            .any(|frame| frame.iter().any(|line| line.contains(needle)))
    }
}

impl Surface for MemorySurface {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    fn clear(&mut self) -> io::Result<()> {
        self.buffer.reset();
        self.clears += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        let frame = self.lines();
        self.frames.push(frame);
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        let key = self
            .keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted keys left"))?;
        self.keys_read += 1;
        Ok(key)
    }
}

/// Scheduler double that serves a fixed listing and records cancellations.
#[derive(Debug, Default)]
pub struct MockQueue {
    /// Raw `squeue`-style text returned by `list_jobs`
    pub output: String,
    pub fail_listing: bool,
    pub fail_cancel: bool,
    pub fetches: usize,
    pub cancelled: Vec<String>,
}

impl MockQueue {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    /// A listing with `rows` jobs named `job0`, `job1`, ...
    pub fn with_jobs(rows: usize) -> Self {
        let mut output = String::from("JOBID NAME STATE\n");
        for i in 0..rows {
            output.push_str(&format!("{} job{} RUNNING\n", 1000 + i, i));
        }
        Self::new(output)
    }
}

impl JobQueue for MockQueue {
    fn list_jobs(&mut self) -> Result<Dataset, JobError> {
        self.fetches += 1;
        if self.fail_listing {
            return Err(JobError::Utf8 {
                command: "squeue".to_string(),
            });
        }
        Ok(parser::parse_squeue(&self.output))
    }

    fn cancel_job(&mut self, job_id: &str) -> Result<(), JobError> {
        self.cancelled.push(job_id.to_string());
        if self.fail_cancel {
            return Err(JobError::Spawn {
                command: "scancel".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "scancel not installed"),
            });
        }
        Ok(())
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
