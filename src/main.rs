use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use maze_chase::config::GameConfig;
use maze_chase::error::Result;
use maze_chase::input::Keyboard;
use maze_chase::render::Renderer;
use maze_chase::{run_session, Game, Termination};

fn main() -> Result<()> {
    let config = GameConfig::load();
    init_logging(&config);

    let mut renderer = Renderer::new(io::stdout(), config.glyphs, config.keys.quit);
    renderer.enter()?;
    let result = run(&mut renderer, &config);
    renderer.leave()?;

    match result? {
        Some((Termination::Caught, score)) => {
            println!();
            println!("GAME OVER!");
            println!("Final score: {score}");
            println!();
        }
        Some((Termination::Quit, score)) => {
            println!();
            println!("BYE! Score: {score}");
            println!();
        }
        None => println!("BYE!"),
    }
    Ok(())
}

/// Returns `None` when the player declined at the start gate.
fn run(renderer: &mut Renderer<Stdout>, config: &GameConfig) -> Result<Option<(Termination, u32)>> {
    let mut keyboard = Keyboard::new(config.keys);
    let keys = config.keys;
    let controls = format!(
        "Move with {}{}{}{} or the arrow keys | {} to quit",
        keys.up.to_ascii_uppercase(),
        keys.left.to_ascii_uppercase(),
        keys.down.to_ascii_uppercase(),
        keys.right.to_ascii_uppercase(),
        keys.quit
    );
    renderer.message(&["", "MAZE CHASE!", controls.as_str(), "", "[enter] to play"])?;
    if !keyboard.confirm_start()? {
        return Ok(None);
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?config.seed, "run started");

    let mut game = Game::new();
    let end = run_session(&mut game, &mut keyboard, renderer, &mut rng)?;
    info!(?end, score = game.score(), "run finished");

    if end == Termination::Caught {
        renderer.footer("GAME OVER! (press any key)")?;
        keyboard.wait_for_any_key()?;
    }
    Ok(Some((end, game.score())))
}

/// The terminal belongs to the renderer, so logs only go to a file.
fn init_logging(config: &GameConfig) {
    let Some(path) = &config.log_file else {
        return;
    };
    match File::create(path) {
        Ok(file) => {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("maze_chase=info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => eprintln!("Warning: could not open log file {}: {e}", path.display()),
    }
}
