use crate::TermInt;
use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

/// Double-buffered terminal surface. Screens draw into the back buffer every tick
/// and `present` only writes the cells that changed since the last frame.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    front: Vec<Cell>,
    back: Vec<Cell>,
    full_redraw: bool,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager::with_size(width, height))
    }

    pub fn with_size(width: TermInt, height: TermInt) -> Self {
        let cells = width as usize * height as usize;
        TermManager {
            width,
            height,
            stdout: stdout(),
            front: vec![BLANK; cells],
            back: vec![BLANK; cells],
            full_redraw: true,
        }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Reallocates the buffers for a new terminal size. Nothing outside the
    /// presentation is touched.
    pub fn resize(&mut self, width: TermInt, height: TermInt) {
        let cells = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.front = vec![BLANK; cells];
        self.back = vec![BLANK; cells];
        self.full_redraw = true;
    }

    pub fn get_terminal_size(&self) -> (TermInt, TermInt) {
        (self.width, self.height)
    }

    pub fn centered_origin(&self, width: TermInt, height: TermInt) -> (i32, i32) {
        (
            (self.width as i32 - width as i32) / 2,
            (self.height as i32 - height as i32) / 2,
        )
    }

    pub fn clear(&mut self) {
        self.back.iter_mut().for_each(|cell| *cell = BLANK);
    }

    /// Cells outside the terminal are dropped, so callers may draw partly off screen.
    pub fn print_at(&mut self, x: i32, y: i32, ch: char, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.back[index] = Cell { ch, color };
        }
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Option<(char, Color)> {
        self.index(x, y).map(|index| (self.back[index].ch, self.back[index].color))
    }

    pub fn print_str(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.print_at(x + i as i32, y, ch, color);
        }
    }

    pub fn draw_box(&mut self, x: i32, y: i32, width: TermInt, height: TermInt, color: Color) {
        let (end_x, end_y) = (x + width as i32 - 1, y + height as i32 - 1);

        for cx in x + 1..end_x {
            self.print_at(cx, y, '─', color);
            self.print_at(cx, end_y, '─', color);
        }

        for cy in y + 1..end_y {
            self.print_at(x, cy, '│', color);
            self.print_at(end_x, cy, '│', color);
        }

        self.print_at(x, y, '┌', color);
        self.print_at(end_x, y, '┐', color);
        self.print_at(x, end_y, '└', color);
        self.print_at(end_x, end_y, '┘', color);
    }

    pub fn present(&mut self) -> io::Result<()> {
        if self.full_redraw {
            queue!(self.stdout, terminal::Clear(ClearType::All))?;
            self.front.iter_mut().for_each(|cell| *cell = BLANK);
        }

        let mut pen = None;
        for (index, cell) in self.back.iter().enumerate() {
            if !self.full_redraw && self.front[index] == *cell {
                continue;
            }

            let x = (index % self.width as usize) as TermInt;
            let y = (index / self.width as usize) as TermInt;
            if pen != Some(cell.color) {
                queue!(self.stdout, style::SetForegroundColor(cell.color))?;
                pen = Some(cell.color);
            }
            queue!(self.stdout, cursor::MoveTo(x, y), style::Print(cell.ch))?;
        }

        self.front.copy_from_slice(&self.back);
        self.full_redraw = false;
        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.width as usize * y as usize + x as usize)
    }
}
