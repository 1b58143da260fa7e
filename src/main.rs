use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use tile_snake::engine::GameEngine;
use tile_snake::input::{command_for, Command};
use tile_snake::logging::init_logger;
use tile_snake::term::TermManager;

fn main() -> Result<()> {
    init_logger();

    if !TermManager::fits_terminal()? {
        let (w, h) = TermManager::required_size();
        bail!("terminal too small, need at least {}x{}", w, h);
    }

    let mut term = TermManager::new();
    let result = run(&mut term);

    // Always try to restore the terminal, even if setup or the game loop failed.
    let restored = term.restore();
    result?;
    Ok(restored?)
}

fn run(term: &mut TermManager) -> Result<()> {
    term.setup()?;

    let origin = Instant::now();
    let mut engine = GameEngine::new(rand::thread_rng());
    engine.start(term, Duration::ZERO)?;

    loop {
        let now = origin.elapsed();
        let timeout = engine
            .next_deadline()
            .and_then(|deadline| deadline.checked_sub(now))
            .unwrap_or(Duration::ZERO);

        // Every key that arrives before the deadline applies to the next tick.
        if let Some(key) = term.poll_key(timeout)? {
            match command_for(&key) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Turn(dir)) => engine.change_direction(dir),
                Some(Command::TogglePause) => {
                    engine.toggle_pause();
                    term.set_paused_visible(engine.is_paused())?;
                }
                None => {}
            }
        }

        engine.advance(term, origin.elapsed())?;
    }
}
