use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use snake_pool::assets::Assets;
use snake_pool::clock::FrameClock;
use snake_pool::config::Config;
use snake_pool::input::{poll_input, Input};
use snake_pool::logging::init_tracing;
use snake_pool::score::FileScoreStore;
use snake_pool::screen::App;
use snake_pool::term::TermManager;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(5);

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.log_file.as_deref()).context("setting up logging")?;

    // Missing art is fatal, and is reported before the terminal is taken over
    let assets = Assets::load(&config.assets_dir).context("loading display assets")?;

    let mut term = TermManager::new().context("reading terminal size")?;
    term.setup().context("preparing terminal")?;

    let res = run(&config, &assets, &mut term);
    let restored = term.restore().context("restoring terminal");
    res.and(restored)
}

fn run(config: &Config, assets: &Assets, term: &mut TermManager) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut app = App::new(FileScoreStore::new(&config.score_file));
    let mut clock = FrameClock::from_fps(config.fps);
    info!(fps = config.fps, seed = ?config.seed, record = app.score().record, "starting");

    let res = app.run_frames(|app| -> Result<bool> {
        let input = poll_input(INPUT_POLL_TIMEOUT).context("reading input")?;

        match input {
            Input::Quit => return Ok(false),
            Input::Resize { width, height } => term.resize(width, height),
            _ => {}
        }

        let dt = clock.tick();
        app.update(input, dt, &mut rng);
        app.render(term, assets).context("drawing frame")?;
        Ok(true)
    });

    info!(record = app.score().record, "quit");
    res
}
