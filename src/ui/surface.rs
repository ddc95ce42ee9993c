//! Cell-grid drawing surfaces.
//!
//! Drawing only touches an off-screen grid; nothing becomes visible until
//! [`Surface::flush`] is called.
use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::error::AppResult;

pub trait Surface {
    /// Writes one cell; coordinates outside the grid are ignored.
    fn draw_cell(&mut self, x: u16, y: u16, ch: char, style: Style);
    /// Makes everything drawn so far visible.
    fn flush(&mut self);
    /// Grid width and height in cells.
    fn size(&self) -> (u16, u16);
    /// Releases the surface. Calling it more than once is a no-op.
    fn close(&mut self);

    fn draw_str(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let mut col = x;
        for ch in text.chars() {
            self.draw_cell(col, y, ch, style);
            let Some(next) = col.checked_add(1) else {
                break;
            };
            col = next;
        }
    }

    /// Overwrites `width` cells starting at (`x`, `y`) with blanks.
    fn blank(&mut self, x: u16, y: u16, width: u16) {
        for offset in 0..width {
            let Some(col) = x.checked_add(offset) else {
                break;
            };
            self.draw_cell(col, y, ' ', Style::default());
        }
    }
}

fn restore_terminal() {
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();
}

/// Surface backed by a ratatui terminal.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    grid: Buffer,
    owns_tty: bool,
    closed: bool,
}

impl TerminalSurface<CrosstermBackend<Stdout>> {
    /// Switches the process terminal to raw mode on the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal cannot be initialised; the
    /// terminal is restored before returning.
    pub fn open() -> AppResult<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(err.into());
        }

        Self::from_backend(CrosstermBackend::new(io::stdout()), true).inspect_err(|_| {
            restore_terminal();
        })
    }
}

impl<B: Backend> TerminalSurface<B> {
    /// Wraps an arbitrary backend without touching the process terminal.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be cleared or sized.
    pub fn with_backend(backend: B) -> AppResult<Self> {
        Self::from_backend(backend, false)
    }

    fn from_backend(backend: B, owns_tty: bool) -> AppResult<Self> {
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        let area = terminal.size()?;
        Ok(Self {
            terminal,
            grid: Buffer::empty(area),
            owns_tty,
            closed: false,
        })
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn draw_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        let area = self.grid.area;
        if x >= area.right() || y >= area.bottom() {
            return;
        }
        let cell = self.grid.get_mut(x, y);
        cell.reset();
        cell.set_char(ch).set_style(style);
    }

    fn flush(&mut self) {
        let grid = &self.grid;
        if let Err(err) = self.terminal.draw(|frame| {
            let area = frame.size();
            frame.render_widget(GridWidget { grid }, area);
        }) {
            tracing::warn!("Failed to flush dashboard: {}", err);
        }
    }

    fn size(&self) -> (u16, u16) {
        (self.grid.area.width, self.grid.area.height)
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.terminal.show_cursor().ok();
        if self.owns_tty {
            restore_terminal();
        }
    }
}

impl<B: Backend> Drop for TerminalSurface<B> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Copies the off-screen grid into the frame being drawn.
struct GridWidget<'grid> {
    grid: &'grid Buffer,
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.left().max(self.grid.area.left());
        let top = area.top().max(self.grid.area.top());
        let right = area.right().min(self.grid.area.right());
        let bottom = area.bottom().min(self.grid.area.bottom());
        for y in top..bottom {
            for x in left..right {
                *buf.get_mut(x, y) = self.grid.get(x, y).clone();
            }
        }
    }
}

/// In-memory surface that records every flushed frame as text rows.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: u16,
    height: u16,
    cells: Vec<char>,
    frames: Vec<Vec<String>>,
    closed: bool,
}

impl MemorySurface {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width).saturating_mul(usize::from(height));
        Self {
            width,
            height,
            cells: vec![' '; len],
            frames: Vec::new(),
            closed: false,
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        usize::from(y)
            .checked_mul(usize::from(self.width))?
            .checked_add(usize::from(x))
    }

    /// Current grid contents, one string per row with trailing blanks removed.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.width).max(1))
            .map(|row| row.iter().collect::<String>().trim_end().to_owned())
            .collect()
    }

    #[must_use]
    pub fn frames(&self) -> &[Vec<String>] {
        &self.frames
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&[String]> {
        self.frames.last().map(Vec::as_slice)
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Surface for MemorySurface {
    fn draw_cell(&mut self, x: u16, y: u16, ch: char, _style: Style) {
        if let Some(idx) = self.index(x, y)
            && let Some(cell) = self.cells.get_mut(idx)
        {
            *cell = ch;
        }
    }

    fn flush(&mut self) {
        let frame = self.rows();
        self.frames.push(frame);
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
