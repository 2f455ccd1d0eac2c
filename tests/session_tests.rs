//! Session behaviour through the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;

use snake::input::Command;
use snake::session::{Flow, TickOutcome};
use snake::{Cell, Config, Direction, GameSession, SnakeError, Status};

fn session(config: Config, seed: u64) -> GameSession<StdRng> {
    GameSession::with_rng(config, StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn test_wraps_to_left_edge_on_tenth_tick() {
    let config = Config { height: 20, width: 20, default_snake_length: 2, wrap: true, ..Config::default() };
    let mut s = session(config, 11);
    assert_eq!(s.grid().head(), Some((10, 10)));

    for _ in 0..9 {
        assert!(matches!(s.tick(), TickOutcome::Moved | TickOutcome::Ate));
    }
    assert_eq!(s.grid().head(), Some((10, 19)));

    assert!(matches!(s.tick(), TickOutcome::Moved | TickOutcome::Ate));
    assert_eq!(s.grid().head(), Some((10, 0)));
    assert!(matches!(s.grid().get((10, 19)), Some(Cell::Body(_))));
}

#[test]
fn test_wall_without_wrap_kills_and_keeps_grid() {
    let mut s = session(Config { wrap: false, ..Config::default() }, 5);
    s.apply(Command::Turn(Direction::Up)).unwrap();

    for _ in 0..10 {
        s.tick();
    }
    assert_eq!(s.grid().head(), Some((0, 10)));

    let before = s.grid().clone();
    assert_eq!(s.tick(), TickOutcome::Died(snake::engine::Collision::Wall));
    assert_eq!(s.status(), Status::Dead);
    assert_eq!(s.grid(), &before);
}

#[test]
fn test_reversal_is_ignored() {
    let mut s = session(Config::default(), 1);
    s.apply(Command::Turn(Direction::Left)).unwrap();
    assert_eq!(s.pending_direction(), Direction::Right);
    s.tick();
    assert_eq!(s.direction(), Direction::Right);
    assert!(s.is_alive());
}

#[test]
fn test_turns_are_checked_per_tick() {
    let mut s = session(Config { default_snake_length: 1, ..Config::default() }, 1);
    s.apply(Command::Turn(Direction::Up)).unwrap();
    s.tick();
    s.apply(Command::Turn(Direction::Left)).unwrap();
    s.tick();
    assert!(s.is_alive());
    assert_eq!(s.grid().head(), Some((9, 9)));
}

#[test]
fn test_grow_cheat_lengthens_next_segment() {
    let mut s = session(Config::default(), 2);
    s.apply(Command::Grow).unwrap();
    assert_eq!(s.length(), 3);
    s.tick();
    assert!(matches!(s.grid().get((10, 10)), Some(Cell::Body(n)) if n >= 3));
}

#[test]
fn test_restart_resets_everything() {
    let mut s = session(Config { wrap: false, ..Config::default() }, 9);
    s.apply(Command::Grow).unwrap();
    s.apply(Command::SpeedUp).unwrap();
    s.apply(Command::Turn(Direction::Down)).unwrap();
    while s.is_alive() {
        s.tick();
    }

    // Restart is the only way out of Dead.
    s.apply(Command::TogglePause).unwrap();
    assert_eq!(s.status(), Status::Dead);
    assert_eq!(s.apply(Command::Restart).unwrap(), Flow::Continue);

    assert_eq!(s.status(), Status::Running);
    assert_eq!(s.length(), 2);
    assert_eq!(s.direction(), Direction::Right);
    assert_eq!(s.frame_interval(), Config::default().frame_interval());
    assert_eq!(s.grid().head(), Some((10, 10)));
    assert_eq!(s.grid().count(|c| c.is_body()), 0);
    assert_eq!(s.grid().count(|c| c.is_fruit()), 1);
}

#[test]
fn test_step_advances_while_paused() {
    let mut s = session(Config::default(), 4);
    s.apply(Command::TogglePause).unwrap();
    assert_eq!(s.tick(), TickOutcome::Idle);
    s.apply(Command::Step).unwrap();
    assert_eq!(s.grid().head(), Some((10, 11)));
    assert_eq!(s.status(), Status::Paused);
}

#[test]
fn test_quit_and_confirm() {
    let mut s = session(Config::default(), 4);
    assert_eq!(s.apply(Command::Confirm).unwrap(), Flow::Continue);
    assert_eq!(s.apply(Command::Quit).unwrap(), Flow::Quit);
}

#[test]
fn test_invalid_config_rejected() {
    assert!(matches!(
        GameSession::new(Config { width: 2, ..Config::default() }),
        Err(SnakeError::InvalidDimension { height: 20, width: 2 })
    ));
    assert!(matches!(
        GameSession::new(Config { fruit_life_min: 0, ..Config::default() }),
        Err(SnakeError::InvalidConfig(_))
    ));
}
