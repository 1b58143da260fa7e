//! End-to-end game flow driven through the scheduler.

use std::time::Duration;

use anyhow::Result;
use rand::rngs::mock::StepRng;

use tile_snake::config::{RESTART_DELAY, TICK_INTERVAL, TILE_COUNT};
use tile_snake::frontend::{GameOverIndicator, Renderer, Rgb, ScoreDisplay};
use tile_snake::{Cell, Direction, GameEngine, Phase, Velocity};

#[derive(Default)]
struct FakeScreen {
    frames: usize,
    scores: Vec<(u32, u32)>,
    game_over_shown: usize,
    game_over_hidden: usize,
}

impl Renderer for FakeScreen {
    fn clear(&mut self, _color: Rgb) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn fill_tile(&mut self, _cell: Cell, _color: Rgb) -> Result<()> {
        Ok(())
    }
}

impl ScoreDisplay for FakeScreen {
    fn show_scores(&mut self, score: u32, best: u32) -> Result<()> {
        self.scores.push((score, best));
        Ok(())
    }
}

impl GameOverIndicator for FakeScreen {
    fn set_game_over_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            self.game_over_shown += 1;
        } else {
            self.game_over_hidden += 1;
        }
        Ok(())
    }
}

fn at_tick(n: u32) -> Duration {
    TICK_INTERVAL * n
}

// StepRng(0, 0) always places the apple at (0, 0).
fn started() -> (GameEngine<StepRng>, FakeScreen) {
    let mut screen = FakeScreen::default();
    let mut engine = GameEngine::new(StepRng::new(0, 0));
    engine.start(&mut screen, Duration::ZERO).unwrap();
    (engine, screen)
}

#[test]
fn test_first_move_right() {
    let (mut engine, mut screen) = started();
    assert_eq!(engine.head(), Cell::new(10, 10));

    engine.change_direction(Direction::Right);
    assert_eq!(engine.velocity(), Velocity { dx: 1, dy: 0 });

    engine.advance(&mut screen, at_tick(1)).unwrap();
    assert_eq!(engine.snake().copied().collect::<Vec<_>>(), vec![Cell::new(11, 10)]);
    assert_eq!(screen.frames, 1);
}

#[test]
fn test_no_ticks_before_interval() {
    let (mut engine, mut screen) = started();
    engine.change_direction(Direction::Down);

    engine.advance(&mut screen, at_tick(1) - Duration::from_millis(1)).unwrap();
    assert_eq!(screen.frames, 0);
    assert_eq!(engine.head(), Cell::new(10, 10));
}

#[test]
fn test_last_direction_before_tick_wins() {
    let (mut engine, mut screen) = started();
    engine.change_direction(Direction::Up);
    engine.change_direction(Direction::Left);

    engine.advance(&mut screen, at_tick(1)).unwrap();
    assert_eq!(engine.head(), Cell::new(9, 10));
}

#[test]
fn test_wall_crash_then_single_restart() {
    let (mut engine, mut screen) = started();
    engine.change_direction(Direction::Right);

    // Ten steps reach x = 20 from the center.
    let crash_tick = (TILE_COUNT - TILE_COUNT / 2) as u32;
    for n in 1..=crash_tick {
        engine.advance(&mut screen, at_tick(n)).unwrap();
    }
    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(screen.game_over_shown, 1);
    assert_eq!(screen.frames, crash_tick as usize - 1);

    let crashed_at = at_tick(crash_tick);

    // Nothing ticks during the game-over window.
    engine.advance(&mut screen, crashed_at + RESTART_DELAY - Duration::from_millis(1)).unwrap();
    assert_eq!(screen.frames, crash_tick as usize - 1);
    assert_eq!(screen.game_over_hidden, 1);

    engine.advance(&mut screen, crashed_at + RESTART_DELAY).unwrap();
    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(screen.game_over_hidden, 2);
    assert_eq!(engine.head(), Cell::new(10, 10));
    assert_eq!(engine.velocity(), Velocity::ZERO);
    assert_eq!(engine.direction(), Direction::Right);

    // Well past the restart, still exactly one.
    engine.advance(&mut screen, crashed_at + RESTART_DELAY * 4).unwrap();
    assert_eq!(screen.game_over_hidden, 2);
}

#[test]
fn test_best_survives_restart() {
    let (mut engine, mut screen) = started();

    // Head for the apple in the corner: up ten rows, then left ten columns.
    engine.change_direction(Direction::Up);
    let mut n = 0;
    for _ in 0..10 {
        n += 1;
        engine.advance(&mut screen, at_tick(n)).unwrap();
    }
    engine.change_direction(Direction::Left);
    for _ in 0..10 {
        n += 1;
        engine.advance(&mut screen, at_tick(n)).unwrap();
    }
    assert_eq!(engine.head(), Cell::new(0, 0));
    assert_eq!(engine.score(), 1);
    assert_eq!(engine.best(), 1);

    // One more step left leaves the grid.
    n += 1;
    engine.advance(&mut screen, at_tick(n)).unwrap();
    assert_eq!(engine.phase(), Phase::GameOver);

    engine.advance(&mut screen, at_tick(n) + RESTART_DELAY).unwrap();
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.best(), 1);
    assert_eq!(screen.scores.last(), Some(&(0, 1)));
}

#[test]
fn test_pause_survives_restart() {
    let (mut engine, mut screen) = started();
    engine.change_direction(Direction::Up);
    for n in 1..=11 {
        engine.advance(&mut screen, at_tick(n)).unwrap();
    }
    assert_eq!(engine.phase(), Phase::GameOver);

    engine.pause();
    assert_eq!(engine.phase(), Phase::GameOver);

    engine.advance(&mut screen, at_tick(11) + RESTART_DELAY).unwrap();
    assert_eq!(engine.phase(), Phase::Paused);

    let frames = screen.frames;
    engine.change_direction(Direction::Down);
    engine.advance(&mut screen, at_tick(11) + RESTART_DELAY + at_tick(5)).unwrap();
    assert_eq!(screen.frames, frames);
    assert_eq!(engine.head(), Cell::new(10, 10));
}
