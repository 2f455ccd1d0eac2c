//! Keyboard commands.
//!
//! A listener thread blocks on terminal events and forwards [`Command`]s over
//! a channel. The frame loop drains the channel through an [`Inbox`], so all
//! session state stays on one thread.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    SpawnFruit,
    Grow,
    /// Advance one frame, even while paused.
    Step,
    SpeedUp,
    SlowDown,
    Restart,
    /// Enter: quits once the snake is dead.
    Confirm,
    Quit,
}

/// Map a key press to a command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if is_ctrl_c(&key) {
        return Some(Command::Quit);
    }

    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Direction::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Turn(Direction::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Direction::Left),
        KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Char('f') | KeyCode::Char('F') => Command::SpawnFruit,
        KeyCode::Char('l') | KeyCode::Char('L') => Command::Grow,
        KeyCode::Char('n') | KeyCode::Char('N') => Command::Step,
        KeyCode::Char('1') => Command::SpeedUp,
        KeyCode::Char('2') => Command::SlowDown,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Enter => Command::Confirm,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Receiving end of the command channel.
pub struct Inbox {
    rx: Receiver<Command>,
}

impl Inbox {
    pub fn new(rx: Receiver<Command>) -> Self {
        Inbox { rx }
    }

    /// Wait up to `timeout` for a command, then take whatever else is queued.
    ///
    /// A closed channel means the listener is gone, which is reported as `Quit`.
    pub fn wait(&self, timeout: Duration) -> Vec<Command> {
        let first = match self.rx.recv_timeout(timeout) {
            Ok(cmd) => cmd,
            Err(RecvTimeoutError::Timeout) => return vec![],
            Err(RecvTimeoutError::Disconnected) => return vec![Command::Quit],
        };

        let mut commands = vec![first];
        commands.extend(self.rx.try_iter());
        commands
    }
}

/// Spawn the key listener and return the inbox it feeds.
pub fn spawn_listener() -> (Inbox, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || listen(tx));
    (Inbox::new(rx), handle)
}

fn listen(tx: Sender<Command>) {
    loop {
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => {
                warn!("reading terminal events failed: {}", e);
                return;
            }
        };

        let Some(cmd) = map_key(key) else { continue };
        debug!("key {:?} -> {:?}", key.code, cmd);
        if tx.send(cmd).is_err() || cmd == Command::Quit {
            return;
        }
    }
}
