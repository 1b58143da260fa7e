//! Game constants. The playfield is fixed at build time.

use std::time::Duration;

use crate::frontend::Rgb;

/// Size of one grid tile in pixels.
pub const GRID_SIZE: i32 = 20;

/// Width and height of the square drawing surface in pixels.
pub const CANVAS_SIZE: i32 = 400;

/// Tiles per axis.
pub const TILE_COUNT: i32 = CANVAS_SIZE / GRID_SIZE;

/// Period of the recurring game tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(150);

/// How long the game-over indicator stays up before the automatic restart.
pub const RESTART_DELAY: Duration = Duration::from_millis(1500);

pub const BACKGROUND_COLOR: Rgb = Rgb(0x11, 0x11, 0x11);
pub const APPLE_COLOR: Rgb = Rgb(0xff, 0x00, 0xff);
pub const SNAKE_COLOR: Rgb = Rgb(0x00, 0xff, 0x99);

/// Log filter, in `env_logger` syntax.
pub const LOG_FILTER_ENV: &str = "TILE_SNAKE_LOG";

/// File the log is written to. Logging stays off when unset, the terminal is in raw mode.
pub const LOG_FILE_ENV: &str = "TILE_SNAKE_LOG_FILE";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_divides_canvas() {
        assert_eq!(CANVAS_SIZE % GRID_SIZE, 0);
        assert_eq!(TILE_COUNT, 20);
    }
}
