//! Seams between the engine and whatever shows the game.

use anyhow::Result;

use crate::snake::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub trait Renderer {
    /// Fills the whole surface.
    fn clear(&mut self, color: Rgb) -> Result<()>;

    /// Fills one grid tile.
    fn fill_tile(&mut self, cell: Cell, color: Rgb) -> Result<()>;

    /// Called once the frame is complete.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

pub trait ScoreDisplay {
    fn show_scores(&mut self, score: u32, best: u32) -> Result<()>;
}

pub trait GameOverIndicator {
    fn set_game_over_visible(&mut self, visible: bool) -> Result<()>;
}

/// Everything the engine talks to.
pub trait Frontend: Renderer + ScoreDisplay + GameOverIndicator {}

impl<T: Renderer + ScoreDisplay + GameOverIndicator> Frontend for T {}
