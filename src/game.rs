use std::time::{Duration, Instant};

use crate::config::Config;
use crate::input::{is_ctrl_c, Inbox};
use crate::session::{Flow, GameSession, Status, TickOutcome};
use crate::term::{Glyphs, TermManager};

use anyhow::Result;
use crossterm::event::KeyCode;
use log::info;

/// Pause before the first move so the player can find the snake.
const START_DELAY_MS: u64 = 500;

/// Terminal front end: draws the session and feeds it commands on a timer.
pub struct SnakeGame {
    term: TermManager,
    glyphs: Glyphs,
    session: GameSession,
    overlay: Option<Status>,
}

impl SnakeGame {
    pub fn new(config: Config) -> Result<Self> {
        let glyphs = Glyphs::from_config(&config);
        let session = GameSession::new(config)?;
        Ok(SnakeGame { term: TermManager::new()?, glyphs, session, overlay: None })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }

    /// Show the controls. Returns false if the player quit instead of starting.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Controls:",
            "Arrow keys or WASD to move",
            "",
            "Cheats:",
            "L - make snake longer",
            "F - spawn a new fruit",
            "Space - pause",
            "N - next frame",
            "1 / 2 - faster / slower",
            "",
            "Press ENTER to start, Q to quit",
        ];

        self.term.show_message(lines)?;

        loop {
            let key = self.term.read_key_blocking()?;
            if is_ctrl_c(&key) || matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                return Ok(false);
            }
            if key.code == KeyCode::Enter {
                break;
            }
        }

        self.term.hide_message()?;
        Ok(true)
    }

    /// Run frames until the player quits.
    pub fn play(&mut self, inbox: &Inbox) -> Result<()> {
        self.term.clear()?;
        self.redraw()?;

        let mut next_tick = Instant::now() + Duration::from_millis(START_DELAY_MS);

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            let mut dirty = false;

            for cmd in inbox.wait(timeout) {
                let was_dead = !self.session.is_alive();
                if self.session.apply(cmd)? == Flow::Quit {
                    info!("quit with length {}", self.session.length());
                    return Ok(());
                }
                if was_dead && self.session.is_alive() {
                    self.term.clear()?;
                    self.overlay = None;
                    next_tick = Instant::now() + Duration::from_millis(START_DELAY_MS);
                }
                dirty = true;
            }

            if Instant::now() >= next_tick {
                next_tick = Instant::now() + self.session.frame_interval();
                match self.session.tick() {
                    TickOutcome::Idle => {}
                    TickOutcome::Died(collision) => {
                        info!("died ({}) with score {}", collision, self.session.score());
                        dirty = true;
                    }
                    TickOutcome::Moved | TickOutcome::Ate => dirty = true,
                }
            }

            if dirty {
                self.redraw()?;
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn redraw(&mut self) -> Result<()> {
        let paused = if self.session.status() == Status::Paused { "  [paused]" } else { "" };
        let status_line = format!(
            "Length {}  {}ms{}",
            self.session.length(),
            self.session.frame_interval().as_millis(),
            paused
        );
        self.term.draw_grid(self.session.grid(), &self.glyphs, &status_line)?;

        let status = self.session.status();
        if self.overlay == Some(status) {
            return Ok(());
        }

        match status {
            Status::Running => self.term.hide_message()?,
            Status::Paused => self.term.show_message(&["Paused", "Space to resume"])?,
            Status::Dead => {
                let cause = match self.session.collision() {
                    Some(collision) => format!("You {}.", collision),
                    None => "You died.".to_string(),
                };
                self.term.show_message(&[
                    cause.as_str(),
                    &*format!("Score: {}", self.session.score()),
                    "",
                    "Press ENTER to end or R to restart",
                ])?;
            }
        }
        self.overlay = Some(status);
        Ok(())
    }
}
