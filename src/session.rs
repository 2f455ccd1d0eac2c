//! A running game: owns the grid and everything the player can change.
//!
//! The session is single-owner. The input thread never touches it; commands
//! arrive through [`crate::input::Inbox`] and are applied here between ticks.

use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Config, FRAME_STEP_MS, MIN_FRAME_MS};
use crate::direction::{Direction, DirectionController};
use crate::engine::{self, Collision, Rules};
use crate::error::{Result, SnakeError};
use crate::grid::{Cell, Grid};
use crate::input::Command;
use crate::spawner::FruitSpawner;

pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    Dead,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or dead; nothing moved.
    Idle,
    Moved,
    Ate,
    Died(Collision),
}

/// Whether the driver should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything that is thrown away on restart.
#[derive(Debug, Clone)]
struct SessionState {
    grid: Grid,
    direction: DirectionController,
    length: u32,
    status: Status,
    collision: Option<Collision>,
    frame_interval: Duration,
    fruit_present: bool,
}

impl SessionState {
    fn fresh(config: &Config) -> Result<Self> {
        Ok(SessionState {
            grid: Grid::new(config.height, config.width)?,
            direction: DirectionController::new(INITIAL_DIRECTION),
            length: config.default_snake_length,
            status: Status::Running,
            collision: None,
            frame_interval: config.frame_interval(),
            fruit_present: false,
        })
    }
}

pub struct GameSession<R: Rng = StdRng> {
    config: Config,
    rules: Rules,
    spawner: FruitSpawner<R>,
    state: SessionState,
}

impl GameSession<StdRng> {
    /// Start a session, seeding fruit placement from `config.seed` or from entropy.
    pub fn new(config: Config) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameSession::with_rng(config, rng)
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(config: Config, rng: R) -> Result<Self> {
        config.validate()?;

        let state = SessionState::fresh(&config)?;
        let mut session = GameSession {
            rules: config.rules(),
            spawner: FruitSpawner::new(rng, config.fruit_lifetime()),
            config,
            state,
        };
        session.ensure_fruit();
        info!(
            "new session {}x{}, length {}, wrap {}, despawn {}",
            session.config.height,
            session.config.width,
            session.config.default_snake_length,
            session.rules.wrap,
            session.rules.fruits_despawn
        );
        Ok(session)
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn is_alive(&self) -> bool {
        self.state.status != Status::Dead
    }

    /// How the snake died, if it did.
    pub fn collision(&self) -> Option<Collision> {
        self.state.collision
    }

    pub fn length(&self) -> u32 {
        self.state.length
    }

    /// Growth since the start of this round.
    pub fn score(&self) -> u32 {
        self.state.length.saturating_sub(self.config.default_snake_length)
    }

    pub fn direction(&self) -> Direction {
        self.state.direction.active()
    }

    pub fn pending_direction(&self) -> Direction {
        self.state.direction.pending()
    }

    pub fn frame_interval(&self) -> Duration {
        self.state.frame_interval
    }

    pub fn fruit_present(&self) -> bool {
        self.state.fruit_present
    }

    /// Advance one frame. Does nothing unless running.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.status != Status::Running {
            return TickOutcome::Idle;
        }
        self.advance()
    }

    /// Advance one frame even while paused.
    pub fn step(&mut self) -> TickOutcome {
        if self.state.status == Status::Dead {
            return TickOutcome::Idle;
        }
        self.advance()
    }

    fn advance(&mut self) -> TickOutcome {
        let direction = self.state.direction.commit();

        match engine::advance(&self.state.grid, direction, self.state.length, self.rules) {
            Err(collision) => {
                info!("snake {} at length {}", collision, self.state.length);
                self.state.status = Status::Dead;
                self.state.collision = Some(collision);
                TickOutcome::Died(collision)
            }
            Ok(next) => {
                self.state.grid = next.grid;
                self.state.length = next.length;
                if next.need_fruit {
                    self.state.fruit_present = false;
                }
                if next.ate_fruit {
                    debug!("ate fruit, length now {}", next.length);
                }
                self.ensure_fruit();

                if next.ate_fruit {
                    TickOutcome::Ate
                } else {
                    TickOutcome::Moved
                }
            }
        }
    }

    /// Place a fruit if none is on the grid. A full grid is retried next tick.
    fn ensure_fruit(&mut self) {
        if self.state.fruit_present {
            return;
        }
        match self.spawner.try_spawn(&mut self.state.grid) {
            Ok(_) => self.state.fruit_present = true,
            Err(SnakeError::NoEmptyCellAvailable) => debug!("no room for fruit, retrying next tick"),
            Err(e) => warn!("fruit spawn failed: {}", e),
        }
    }

    pub fn propose_direction(&mut self, direction: Direction) {
        self.state.direction.propose(direction);
    }

    pub fn toggle_pause(&mut self) {
        self.state.status = match self.state.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            Status::Dead => Status::Dead,
        };
    }

    /// Move the fruit somewhere else, or place one if there is none.
    pub fn spawn_fruit(&mut self) {
        if self.state.status == Status::Dead {
            return;
        }
        self.state.grid.clear_fruit();
        self.state.fruit_present = false;
        self.ensure_fruit();
    }

    /// Cheat: one more segment, without eating.
    pub fn grow(&mut self) {
        if self.state.status != Status::Dead {
            self.state.length += 1;
        }
    }

    pub fn speed_up(&mut self) {
        let ms = self.state.frame_interval.as_millis() as u64;
        if ms > MIN_FRAME_MS {
            self.state.frame_interval = Duration::from_millis((ms - FRAME_STEP_MS).max(MIN_FRAME_MS));
        }
    }

    pub fn slow_down(&mut self) {
        self.state.frame_interval += Duration::from_millis(FRAME_STEP_MS);
    }

    /// Start over after death. Ignored while the snake is alive.
    pub fn restart(&mut self) -> Result<()> {
        if self.state.status != Status::Dead {
            return Ok(());
        }
        self.state = SessionState::fresh(&self.config)?;
        self.ensure_fruit();
        info!("session restarted");
        Ok(())
    }

    /// Apply one player command.
    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Turn(direction) => self.propose_direction(direction),
            Command::TogglePause => self.toggle_pause(),
            Command::SpawnFruit => self.spawn_fruit(),
            Command::Grow => self.grow(),
            Command::Step => {
                self.step();
            }
            Command::SpeedUp => self.speed_up(),
            Command::SlowDown => self.slow_down(),
            Command::Restart => self.restart()?,
            Command::Confirm if self.state.status == Status::Dead => return Ok(Flow::Quit),
            Command::Confirm => {}
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Number of head cells; one while the snake lives.
    pub fn head_count(&self) -> usize {
        self.state.grid.count(|cell| *cell == Cell::Head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn session(config: Config) -> GameSession<StdRng> {
        GameSession::with_rng(config, StdRng::seed_from_u64(3)).unwrap()
    }

    /// Drop the fruit so movement tests are not disturbed by eating.
    fn without_fruit(mut s: GameSession<StdRng>) -> GameSession<StdRng> {
        s.state.grid.clear_fruit();
        s.state.fruit_present = true;
        s
    }

    #[test]
    fn starts_running_with_fruit() {
        let s = session(Config::default());
        assert_eq!(s.status(), Status::Running);
        assert!(s.fruit_present());
        assert_eq!(s.grid().count(Cell::is_fruit), 1);
        assert_eq!(s.length(), 2);
        assert_eq!(s.direction(), Right);
    }

    #[test]
    fn invalid_dimensions_fail() {
        let res = GameSession::new(Config { height: 3, ..Config::default() });
        assert!(matches!(res, Err(SnakeError::InvalidDimension { height: 3, width: 20 })));
    }

    #[test]
    fn wall_death_keeps_previous_grid() {
        let mut s = without_fruit(session(Config { wrap: false, ..Config::default() }));
        s.state.grid.set((10, 10), Cell::Empty);
        s.state.grid.set((0, 5), Cell::Head);
        s.propose_direction(Up);

        let before = s.grid().clone();
        assert_eq!(s.tick(), TickOutcome::Died(Collision::Wall));
        assert_eq!(s.status(), Status::Dead);
        assert_eq!(s.grid(), &before);
        assert_eq!(s.tick(), TickOutcome::Idle);
    }

    #[test]
    fn self_bite_kills() {
        let mut s = without_fruit(session(Config::default()));
        s.state.grid.set((10, 11), Cell::Body(3));
        assert_eq!(s.tick(), TickOutcome::Died(Collision::SelfBite));
        assert!(!s.is_alive());
    }

    #[test]
    fn eating_respawns_fruit() {
        let mut s = session(Config::default());
        s.state.grid.clear_fruit();
        s.state.grid.set((10, 11), Cell::Fruit(15));

        assert_eq!(s.tick(), TickOutcome::Ate);
        assert_eq!(s.length(), 3);
        assert_eq!(s.score(), 1);
        assert_eq!(s.grid().get((10, 10)), Some(Cell::Body(3)));
        assert!(s.fruit_present());
        assert_eq!(s.grid().count(Cell::is_fruit), 1);
    }

    #[test]
    fn despawned_fruit_is_replaced_same_tick() {
        let mut s = session(Config { fruits_despawn: true, ..Config::default() });
        s.state.grid.clear_fruit();
        s.state.grid.set((0, 0), Cell::Fruit(1));

        assert_eq!(s.tick(), TickOutcome::Moved);
        assert!(s.fruit_present());
        assert_eq!(s.grid().count(Cell::is_fruit), 1);
        assert_ne!(s.grid().get((0, 0)), Some(Cell::Fruit(1)));
    }

    #[test]
    fn pause_blocks_tick_but_not_step() {
        let mut s = without_fruit(session(Config::default()));
        s.toggle_pause();
        assert_eq!(s.status(), Status::Paused);
        assert_eq!(s.tick(), TickOutcome::Idle);
        assert_eq!(s.grid().head(), Some((10, 10)));

        assert_eq!(s.step(), TickOutcome::Moved);
        assert_eq!(s.grid().head(), Some((10, 11)));
        assert_eq!(s.status(), Status::Paused);

        s.toggle_pause();
        assert_eq!(s.status(), Status::Running);
    }

    #[test]
    fn forced_spawn_keeps_single_fruit() {
        let mut s = session(Config::default());
        for _ in 0..10 {
            s.spawn_fruit();
            assert_eq!(s.grid().count(Cell::is_fruit), 1);
        }
    }

    #[test]
    fn speed_keys_clamp() {
        let mut s = session(Config { frame_interval_ms: 25, ..Config::default() });
        s.speed_up();
        assert_eq!(s.frame_interval(), Duration::from_millis(15));
        s.speed_up();
        s.speed_up();
        assert_eq!(s.frame_interval(), Duration::from_millis(MIN_FRAME_MS));
        s.slow_down();
        assert_eq!(s.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn restart_only_from_dead() {
        let mut s = without_fruit(session(Config::default()));
        s.grow();
        s.restart().unwrap();
        assert_eq!(s.length(), 3);

        s.state.grid.set((10, 11), Cell::Body(2));
        s.propose_direction(Up);
        s.propose_direction(Right);
        assert!(matches!(s.tick(), TickOutcome::Died(_)));

        s.restart().unwrap();
        assert_eq!(s.status(), Status::Running);
        assert_eq!(s.length(), 2);
        assert_eq!(s.direction(), Right);
        assert_eq!(s.collision(), None);
        assert_eq!(s.grid().head(), Some((10, 10)));
        assert_eq!(s.grid().count(Cell::is_body), 0);
        assert!(s.fruit_present());
    }

    #[test]
    fn confirm_quits_only_when_dead() {
        let mut s = without_fruit(session(Config::default()));
        assert_eq!(s.apply(Command::Confirm).unwrap(), Flow::Continue);
        s.state.grid.set((10, 11), Cell::Body(2));
        s.tick();
        assert_eq!(s.apply(Command::Confirm).unwrap(), Flow::Quit);
        assert_eq!(s.apply(Command::Quit).unwrap(), Flow::Quit);
    }
}
