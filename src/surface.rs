//! Drawing surface used by the table view and the dialogs.
//!
//! A surface is a character grid addressed by `(row, col)` plus a blocking
//! key source. Writes land in a back buffer and only reach the screen on
//! [`Surface::flush`].

use std::io::{self, Stdout};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    prelude::*,
    widgets::{Block, Clear, Widget},
};

/// Text attribute for a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attr {
    Plain,
    /// Selected table row
    Highlight,
    /// Instructions bar and the chosen dialog option
    Reverse,
}

impl Attr {
    pub fn style(self) -> Style {
        match self {
            Attr::Plain => Style::default(),
            Attr::Highlight => Style::default().fg(Color::Red).bg(Color::Black),
            Attr::Reverse => Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// A bordered sub-region of a surface. Coordinates passed to
/// [`Surface::write_in`] are relative to its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    area: Rect,
}

impl Window {
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn height(&self) -> u16 {
        self.area.height
    }

    pub fn width(&self) -> u16 {
        self.area.width
    }
}

/// Truncate `text` to at most `max` characters.
pub fn clip_text(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Write `text` at `(row, col)` inside `bounds`, clipped to its right edge.
fn write_clipped(buf: &mut Buffer, bounds: Rect, row: u16, col: u16, text: &str, attr: Attr) {
    let bounds = bounds.intersection(buf.area);
    if row >= bounds.height || col >= bounds.width {
        return;
    }
    let max_width = (bounds.width - col) as usize;
    buf.set_stringn(bounds.x + col, bounds.y + row, text, max_width, attr.style());
}

/// The drawing contract the UI is written against.
pub trait Surface {
    fn buffer(&self) -> &Buffer;

    fn buffer_mut(&mut self) -> &mut Buffer;

    /// Blank the back buffer, resizing it to the current screen size.
    fn clear(&mut self) -> io::Result<()>;

    /// Make everything written so far visible.
    fn flush(&mut self) -> io::Result<()>;

    /// Block until a key is pressed.
    fn read_key(&mut self) -> io::Result<KeyEvent>;

    /// `(rows, cols)`
    fn size(&self) -> (u16, u16) {
        let area = self.buffer().area;
        (area.height, area.width)
    }

    /// Write `text` at `(row, col)`. Anything past the last column is dropped.
    fn write(&mut self, row: u16, col: u16, text: &str, attr: Attr) {
        let area = self.buffer().area;
        write_clipped(self.buffer_mut(), area, row, col, text, attr);
    }

    /// Clear a `height` x `width` box at `(top, left)` and draw its border.
    fn open_window(&mut self, height: u16, width: u16, top: u16, left: u16) -> Window {
        let area = Rect::new(left, top, width, height).intersection(self.buffer().area);
        let window = Window { area };
        self.clear_window(&window);
        window
    }

    /// Blank a window's contents and redraw its border.
    fn clear_window(&mut self, window: &Window) {
        Clear.render(window.area, self.buffer_mut());
        self.draw_border(window);
    }

    fn draw_border(&mut self, window: &Window) {
        Block::bordered().render(window.area, self.buffer_mut());
    }

    /// Write relative to a window, clipped to the window's width.
    fn write_in(&mut self, window: &Window, row: u16, col: u16, text: &str, attr: Attr) {
        write_clipped(self.buffer_mut(), window.area, row, col, text, attr);
    }
}

/// Surface backed by the real terminal.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    buffer: Buffer,
}

impl TerminalSurface {
    pub fn new(terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            buffer: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Surface for TerminalSurface {
    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    fn clear(&mut self) -> io::Result<()> {
        let size = self.terminal.size()?;
        self.buffer = Buffer::empty(Rect::new(0, 0, size.width, size.height));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        let back = &self.buffer;
        self.terminal.draw(|frame| {
            let front = frame.buffer_mut();
            let area = front.area.intersection(back.area);
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(src), Some(dst)) = (back.cell((x, y)), front.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        })?;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => return Ok(key),
                // Wake the caller so it redraws at the new size
                Event::Resize(_, _) => return Ok(KeyEvent::from(KeyCode::Null)),
                _ => {}
            }
        }
    }
}
