use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::Rules;
use crate::error::{Result, SnakeError};
use crate::grid::MIN_SIZE;

/// Frame interval never drops below this, whatever the speed-up key says.
pub const MIN_FRAME_MS: u64 = 10;
/// How much the speed keys change the frame interval.
pub const FRAME_STEP_MS: u64 = 10;

/// Game settings, fixed for the lifetime of a session except the frame
/// interval, which the speed keys adjust on the running session.
#[derive(Debug, Clone, Parser)]
#[command(name = "snake", version, about = "Snake in the terminal")]
pub struct Config {
    /// Rows in the playing field (at least 5)
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Columns in the playing field (at least 5)
    #[arg(long, default_value_t = 20)]
    pub width: usize,

    /// Starting snake length
    #[arg(long = "length", default_value_t = 2)]
    pub default_snake_length: u32,

    /// Die on the walls instead of wrapping to the other side
    #[arg(long = "no-wrap", action = clap::ArgAction::SetFalse)]
    pub wrap: bool,

    /// Let uneaten fruit disappear after a while
    #[arg(long = "despawn")]
    pub fruits_despawn: bool,

    /// Milliseconds between frames
    #[arg(long = "frame-ms", default_value_t = 150)]
    pub frame_interval_ms: u64,

    /// Shortest fruit lifetime in ticks
    #[arg(long, default_value_t = 10)]
    pub fruit_life_min: u32,

    /// Longest fruit lifetime in ticks
    #[arg(long, default_value_t = 20)]
    pub fruit_life_max: u32,

    /// Seed for fruit placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (RUST_LOG picks the level)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value_t = 'X')]
    pub head_char: char,

    #[arg(long, default_value_t = 'o')]
    pub body_char: char,

    #[arg(long, default_value_t = '$')]
    pub fruit_char: char,

    #[arg(long, default_value_t = '.')]
    pub empty_char: char,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            height: 20,
            width: 20,
            default_snake_length: 2,
            wrap: true,
            fruits_despawn: false,
            frame_interval_ms: 150,
            fruit_life_min: 10,
            fruit_life_max: 20,
            seed: None,
            log_file: None,
            head_char: 'X',
            body_char: 'o',
            fruit_char: '$',
            empty_char: '.',
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.height < MIN_SIZE || self.width < MIN_SIZE {
            return Err(SnakeError::InvalidDimension { height: self.height, width: self.width });
        }
        if self.default_snake_length == 0 {
            return Err(SnakeError::InvalidConfig("snake length must be at least 1".into()));
        }
        if self.frame_interval_ms == 0 {
            return Err(SnakeError::InvalidConfig("frame interval must be positive".into()));
        }
        if self.fruit_life_min == 0 || self.fruit_life_min > self.fruit_life_max {
            return Err(SnakeError::InvalidConfig(format!(
                "bad fruit lifetime range {}..={}",
                self.fruit_life_min, self.fruit_life_max
            )));
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules { wrap: self.wrap, fruits_despawn: self.fruits_despawn }
    }

    pub fn fruit_lifetime(&self) -> RangeInclusive<u32> {
        self.fruit_life_min..=self.fruit_life_max
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
