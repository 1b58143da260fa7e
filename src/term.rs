use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::config::TILE_COUNT;
use crate::frontend::{GameOverIndicator, Renderer, Rgb, ScoreDisplay};
use crate::snake::Cell;

const TILE_STR: &str = "\u{2588}\u{2588}";

/// Terminal columns per tile, so tiles look roughly square.
const TILE_COLUMNS: u16 = 2;

/// Arena size in terminal cells, border included.
pub const ARENA_WIDTH: u16 = TILE_COUNT as u16 * TILE_COLUMNS + 2;
pub const ARENA_HEIGHT: u16 = TILE_COUNT as u16 + 2;

/// Rows needed below the arena for the score line.
const STATUS_ROWS: u16 = 1;

pub struct TermManager {
    stdout: Stdout,
    // Colors drawn into the current frame, and what is actually on screen.
    tiles: Vec<Rgb>,
    shown: Vec<Option<Rgb>>,
    game_over: bool,
    paused: bool,
    current_msg: Option<Message>,
}

struct Message {
    top_left: (u16, u16),
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> Self {
        let n = (TILE_COUNT * TILE_COUNT) as usize;
        TermManager {
            stdout: stdout(),
            tiles: vec![Rgb(0, 0, 0); n],
            shown: vec![None; n],
            game_over: false,
            paused: false,
            current_msg: None,
        }
    }

    /// Minimum terminal size for the arena plus the status line.
    pub fn required_size() -> (u16, u16) {
        (ARENA_WIDTH, ARENA_HEIGHT + STATUS_ROWS)
    }

    pub fn fits_terminal() -> io::Result<bool> {
        let (w, h) = terminal::size()?;
        let (need_w, need_h) = Self::required_size();
        Ok(w >= need_w && h >= need_h)
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Waits up to `timeout` for one key event.
    pub fn poll_key(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    pub fn set_paused_visible(&mut self, visible: bool) -> io::Result<()> {
        self.paused = visible;
        self.refresh_overlay()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> io::Result<()> {
        let end_x = ARENA_WIDTH - 1;
        let end_y = ARENA_HEIGHT - 1;

        for x in 0..ARENA_WIDTH {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            queue!(self.stdout, cursor::MoveTo(x, 0), Print(ch), cursor::MoveTo(x, end_y), Print(ch))?;
        }

        for y in 1..end_y {
            queue!(self.stdout, cursor::MoveTo(0, y), Print('|'), cursor::MoveTo(end_x, y), Print('|'))?;
        }

        self.stdout.flush()
    }

    fn index(cell: Cell) -> Option<usize> {
        if cell.in_bounds(TILE_COUNT) {
            Some((cell.y * TILE_COUNT + cell.x) as usize)
        } else {
            None
        }
    }

    fn screen_pos(idx: usize) -> (u16, u16) {
        let x = (idx % TILE_COUNT as usize) as u16;
        let y = (idx / TILE_COUNT as usize) as u16;
        (1 + x * TILE_COLUMNS, 1 + y)
    }

    /// Writes every tile whose color differs from the screen.
    fn flush_tiles(&mut self) -> io::Result<()> {
        for idx in 0..self.tiles.len() {
            let color = self.tiles[idx];
            if self.shown[idx] == Some(color) || self.covered_by_message(idx) {
                continue;
            }

            let (x, y) = Self::screen_pos(idx);
            let Rgb(r, g, b) = color;
            queue!(
                self.stdout,
                cursor::MoveTo(x, y),
                SetForegroundColor(Color::Rgb { r, g, b }),
                Print(TILE_STR)
            )?;
            self.shown[idx] = Some(color);
        }

        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()
    }

    fn covered_by_message(&self, idx: usize) -> bool {
        match &self.current_msg {
            Some(msg) => {
                let (x, y) = Self::screen_pos(idx);
                let (left, top) = msg.top_left;
                x + TILE_COLUMNS > left && x < left + msg.width && y >= top && y < top + msg.height
            }
            None => false,
        }
    }

    fn refresh_overlay(&mut self) -> io::Result<()> {
        if self.game_over {
            self.show_message(&["Game over!", "", "Restarting..."])
        } else if self.paused {
            self.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])
        } else {
            self.hide_message()
        }
    }

    fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        self.hide_message()?;

        let msg_height = lines.len() as u16 + 2;
        let msg_width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 2;
        let center = (ARENA_WIDTH / 2, ARENA_HEIGHT / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        queue!(self.stdout, ResetColor)?;
        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), Print(padded_line))?;
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.stdout.flush()
    }

    fn hide_message(&mut self) -> io::Result<()> {
        if self.current_msg.take().is_none() {
            return Ok(());
        }

        // Everything under the box has to be drawn again.
        self.shown.iter_mut().for_each(|c| *c = None);
        self.flush_tiles()
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TermManager {
    fn clear(&mut self, color: Rgb) -> Result<()> {
        self.tiles.iter_mut().for_each(|c| *c = color);
        Ok(())
    }

    fn fill_tile(&mut self, cell: Cell, color: Rgb) -> Result<()> {
        if let Some(idx) = Self::index(cell) {
            self.tiles[idx] = color;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        Ok(self.flush_tiles()?)
    }
}

impl ScoreDisplay for TermManager {
    fn show_scores(&mut self, score: u32, best: u32) -> Result<()> {
        let line = format!("Score: {:<6} Best: {:<6}", score, best);
        queue!(self.stdout, ResetColor, cursor::MoveTo(0, ARENA_HEIGHT), Print(line))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl GameOverIndicator for TermManager {
    fn set_game_over_visible(&mut self, visible: bool) -> Result<()> {
        self.game_over = visible;
        Ok(self.refresh_overlay()?)
    }
}
