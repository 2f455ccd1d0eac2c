use std::io::{stdout, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::event::{read, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::config::Config;
use crate::grid::{Cell, Grid};

pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

/// Characters used to draw each kind of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub head: char,
    pub body: char,
    pub fruit: char,
    pub empty: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs { head: 'X', body: 'o', fruit: '$', empty: '.' }
    }
}

impl Glyphs {
    pub fn from_config(config: &Config) -> Self {
        Glyphs {
            head: config.head_char,
            body: config.body_char,
            fruit: config.fruit_char,
            empty: config.empty_char,
        }
    }

    pub fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => self.empty,
            Cell::Head => self.head,
            Cell::Body(_) => self.body,
            Cell::Fruit(_) => self.fruit,
        }
    }

    /// `height` strings of `width` glyphs each.
    pub fn render_rows(&self, grid: &Grid) -> Vec<String> {
        grid.rows().map(|row| row.iter().map(|cell| self.glyph(*cell)).collect()).collect()
    }
}

/// Owns the terminal: raw mode, the alternate screen, and a copy of what is
/// on screen so overlay messages can be removed again.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermCoords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("entering alternate screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("leaving alternate screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    /// Draw the grid at the top-left corner with a status line under it.
    pub fn draw_grid(&mut self, grid: &Grid, glyphs: &Glyphs, status: &str) -> Result<()> {
        let rows = glyphs.render_rows(grid);
        for (y, row) in rows.iter().enumerate() {
            self.print_str_at((0, y as TermInt), row)?;
        }

        let status = format!("{status:<width$}", width = grid.width().max(status.len() + 1));
        self.print_str_at((0, rows.len() as TermInt), &status)?;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 2) as TermInt;
        let top_left = (
            (self.width / 2).saturating_sub(msg_width / 2),
            (self.height / 2).saturating_sub(msg_height / 2),
        );

        let blank = " ".repeat(msg_width as usize);
        self.print_overlay((top_left.0, top_left.1), &blank)?;
        self.print_overlay((top_left.0, top_left.1 + msg_height - 1), &blank)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_overlay((top_left.0, top_left.1 + i as TermInt + 1), &padded_line)?;
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let Some(msg) = self.current_msg.take() else { return Ok(()) };

        // Put back what the message covered.
        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            for x in msg.top_left.0..msg.top_left.0 + msg.width {
                if let Some(i) = self.index((x, y)) {
                    let ch = self.screen[i];
                    queue!(self.stdout, cursor::MoveTo(x, y), style::Print(ch))?;
                }
            }
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("clearing screen")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing stdout")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, (x, y): TermCoords) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.width as usize * y as usize + x as usize)
    }

    fn covered_by_message(&self, (x, y): TermCoords) -> bool {
        self.current_msg.as_ref().map_or(false, |m| {
            x >= m.top_left.0 && x < m.top_left.0 + m.width && y >= m.top_left.1 && y < m.top_left.1 + m.height
        })
    }

    /// Write into the screen buffer; cells under an open message are only
    /// shown once the message is hidden.
    fn print_str_at(&mut self, pos: TermCoords, text: &str) -> Result<()> {
        for (dx, ch) in text.chars().enumerate() {
            let at = (pos.0 + dx as TermInt, pos.1);
            let Some(i) = self.index(at) else { continue };
            self.screen[i] = ch;
            if !self.covered_by_message(at) {
                queue!(self.stdout, cursor::MoveTo(at.0, at.1), style::Print(ch))?;
            }
        }
        Ok(())
    }

    /// Draw over the screen without touching the buffer.
    fn print_overlay(&mut self, pos: TermCoords, text: &str) -> Result<()> {
        for (dx, ch) in text.chars().enumerate() {
            let at = (pos.0 + dx as TermInt, pos.1);
            if self.index(at).is_some() {
                queue!(self.stdout, cursor::MoveTo(at.0, at.1), style::Print(ch))?;
            }
        }
        Ok(())
    }
}
