use std::time::Duration;

use anyhow::Result;
use log::{debug, info, trace};
use rand::Rng;

use crate::config::{APPLE_COLOR, BACKGROUND_COLOR, RESTART_DELAY, SNAKE_COLOR, TICK_INTERVAL, TILE_COUNT};
use crate::frontend::Frontend;
use crate::scheduler::{Scheduler, Timer};
use crate::snake::{Cell, Direction, Snake, Velocity};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    /// Waiting for the delayed restart.
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine is paused; nothing changed.
    Paused,
    Moved,
    Ate,
    Crashed(Collision),
}

/// All game state plus the timers that drive it.
pub struct GameEngine<R: Rng> {
    rng: R,
    scheduler: Scheduler,
    snake: Snake,
    apple: Cell,
    velocity: Velocity,
    direction: Direction,
    score: u32,
    best: u32,
    paused: bool,
}

impl<R: Rng> GameEngine<R> {
    /// Builds an idle engine. Call `start` to show the first frame and begin ticking.
    pub fn new(rng: R) -> Self {
        GameEngine {
            rng,
            scheduler: Scheduler::new(),
            snake: Snake::new(center()),
            apple: center(),
            velocity: Velocity::ZERO,
            direction: Direction::Right,
            score: 0,
            best: 0,
            paused: false,
        }
    }

    /// Resets the round and (re)starts the tick interval. Used for the first
    /// game and for every automatic restart.
    pub fn start(&mut self, ui: &mut impl Frontend, now: Duration) -> Result<()> {
        self.scheduler.clear_interval();
        self.scheduler.clear_timeout();
        self.initialize(ui)?;
        self.scheduler.set_interval(now, TICK_INTERVAL);
        info!("New game started, best score {}", self.best);
        Ok(())
    }

    /// Resets the per-round state. `best` and `paused` survive.
    pub fn initialize(&mut self, ui: &mut impl Frontend) -> Result<()> {
        self.snake = Snake::new(center());
        self.place_apple();
        self.velocity = Velocity::ZERO;
        self.direction = Direction::Right;
        self.score = 0;
        ui.set_game_over_visible(false)?;
        ui.show_scores(self.score, self.best)
    }

    /// Runs every timer due at `now`, in deadline order.
    pub fn advance(&mut self, ui: &mut impl Frontend, now: Duration) -> Result<()> {
        while let Some(timer) = self.scheduler.pop_due(now) {
            match timer {
                Timer::Tick => {
                    self.tick(ui, now)?;
                }
                Timer::Restart => self.start(ui, now)?,
            }
        }
        Ok(())
    }

    /// One simulation step.
    pub fn tick(&mut self, ui: &mut impl Frontend, now: Duration) -> Result<TickOutcome> {
        if self.paused {
            return Ok(TickOutcome::Paused);
        }

        let head = self.snake.push_head(self.velocity);

        let ate = head == self.apple;
        if ate {
            self.score += 1;
            if self.score > self.best {
                self.best = self.score;
            }
            self.place_apple();
        } else {
            self.snake.drop_tail();
        }

        // Checked after the tail moved, so chasing the tail is allowed.
        let collision = if !head.in_bounds(TILE_COUNT) {
            Some(Collision::Wall)
        } else if self.snake.bites_itself() {
            Some(Collision::SelfBite)
        } else {
            None
        };

        if let Some(collision) = collision {
            self.end_game(ui, now, collision)?;
            return Ok(TickOutcome::Crashed(collision));
        }

        self.draw(ui)?;
        ui.show_scores(self.score, self.best)?;

        Ok(if ate { TickOutcome::Ate } else { TickOutcome::Moved })
    }

    /// A reversal only leaves the velocity alone; the requested direction is
    /// always recorded, so the next turn is judged against it.
    pub fn change_direction(&mut self, requested: Direction) {
        if self.direction != requested.opposite() {
            self.velocity = requested.velocity();
        } else {
            trace!("Reversal {:?} -> {:?} ignored", self.direction, requested);
        }
        self.direction = requested;
    }

    pub fn pause(&mut self) {
        if !self.paused {
            debug!("Paused");
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            debug!("Resumed");
        }
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Stops ticking, shows the indicator and arms the delayed restart.
    pub fn end_game(&mut self, ui: &mut impl Frontend, now: Duration, collision: Collision) -> Result<()> {
        info!("Game over ({:?}): score {}, best {}", collision, self.score, self.best);
        self.scheduler.clear_interval();
        ui.set_game_over_visible(true)?;
        self.scheduler.set_timeout(now, RESTART_DELAY);
        Ok(())
    }

    /// Uniform over the whole grid. The apple may land on the snake.
    pub fn place_apple(&mut self) {
        self.apple = Cell::new(self.rng.gen_range(0..TILE_COUNT), self.rng.gen_range(0..TILE_COUNT));
        debug!("Apple placed at ({}, {})", self.apple.x, self.apple.y);
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn phase(&self) -> Phase {
        if self.scheduler.timeout_pending() {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    pub fn snake(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.snake.body()
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn apple(&self) -> Cell {
        self.apple
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn draw(&self, ui: &mut impl Frontend) -> Result<()> {
        ui.clear(BACKGROUND_COLOR)?;
        ui.fill_tile(self.apple, APPLE_COLOR)?;
        for seg in self.snake.body() {
            ui.fill_tile(*seg, SNAKE_COLOR)?;
        }
        ui.present()
    }
}

fn center() -> Cell {
    Cell::new(TILE_COUNT / 2, TILE_COUNT / 2)
}
