use std::env;
use std::fs::File;
use std::sync::Once;

use env_logger::{Builder, Env, Target};

use crate::config::{LOG_FILE_ENV, LOG_FILTER_ENV};

/// Sets up `env_logger` once per process.
///
/// The filter comes from `TILE_SNAKE_LOG` (default `info`). Output goes to the
/// file named by `TILE_SNAKE_LOG_FILE`; without one no logger is installed, so
/// nothing is ever written over the arena.
pub fn init_logger() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let file = match env::var_os(LOG_FILE_ENV).map(File::create) {
            Some(Ok(file)) => file,
            _ => return,
        };

        Builder::from_env(Env::default().filter_or(LOG_FILTER_ENV, "info"))
            .target(Target::Pipe(Box::new(file)))
            .format_timestamp_secs()
            .try_init()
            .ok();
    });
}
