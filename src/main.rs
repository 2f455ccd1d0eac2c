use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use snake::game::SnakeGame;
use snake::input::spawn_listener;
use snake::Config;

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }
    info!("starting with {:?}", config);

    let mut game = SnakeGame::new(config)?;
    game.initialize()?;

    let result = run(&mut game);

    // Always try to restore the terminal, but report the game's error first.
    let restored = game.restore();
    result.and(restored)
}

fn run(game: &mut SnakeGame) -> Result<()> {
    if !game.show_intro()? {
        return Ok(());
    }

    // The listener stays blocked on the terminal until the process exits.
    let (inbox, _listener) = spawn_listener();
    game.play(&inbox)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
