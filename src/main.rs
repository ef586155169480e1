//! Droplet Catch entry point
//!
//! Parses arguments, sets up the terminal and runs the frame loop.

use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use droplet_catch::input::{handle_key_event, GameOverMenu, InputResult, KeyboardControl};
use droplet_catch::ui::draw_ui;
use droplet_catch::utils::{build_info, logging, persistence};
use droplet_catch::{
    GameConfig, GameController, ShapeCanvas, KEY_HOLD_FALLBACK_MS, MAX_FRAME_DELTA_MS,
    REALTIME_FRAME_MS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

fn print_help() {
    println!("Droplet Catch - catch the falling droplets, dodge the red ones\n");
    println!("Usage: droplet-catch [options]\n");
    println!("Options:");
    println!("  --seed <n>       Seed the droplet generator for a repeatable game");
    println!("  --config <path>  Read settings from a JSON file");
    println!("                   (default: ~/.droplet-catch/config.json if present)");
    println!("  --version        Show version information");
    println!("  --help           Show this help message\n");
    println!("Controls: Left/Right move the cup, Q or Esc quits.");
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" => {
                i += 1;
                match args.get(i).and_then(|s| s.parse::<u64>().ok()) {
                    Some(seed) => options.seed = Some(seed),
                    None => {
                        eprintln!("--seed expects a non-negative integer");
                        std::process::exit(1);
                    }
                }
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => options.config_path = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("--config expects a file path");
                        std::process::exit(1);
                    }
                }
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'droplet-catch --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn main() -> io::Result<()> {
    let options = parse_args();

    // A broken log file is not worth refusing to play over
    match logging::init_logging() {
        Ok(path) => log::info!("Logging to {}", path.display()),
        Err(e) => eprintln!("Warning: could not open log file: {}", e),
    }

    let config_path = match options.config_path {
        Some(path) => path,
        None => persistence::default_config_path()?,
    };
    let config = GameConfig::load(&config_path).map_err(|e| {
        log::error!("Config {} rejected: {}", config_path.display(), e);
        io::Error::new(e.kind(), format!("{}: {}", config_path.display(), e))
    })?;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!(
        "Starting {} on a {}x{} field (seed {:?})",
        build_info::version_line(),
        config.width,
        config.height,
        options.seed
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    } else {
        log::info!(
            "Terminal does not report key releases; holding keys for {}ms",
            KEY_HOLD_FALLBACK_MS
        );
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, config, release_events, &mut rng);

    // Restore the terminal whether or not the loop failed
    if release_events {
        let _ = terminal.backend_mut().execute(PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Game loop failed: {}", e);
    }
    result
}

/// Frame loop: draw, take input, advance the game clock by the elapsed time.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: GameConfig,
    release_events: bool,
    rng: &mut StdRng,
) -> io::Result<()> {
    let surface = ShapeCanvas::new(config.width as f64, config.height as f64);
    let keyboard = if release_events {
        KeyboardControl::new()
    } else {
        KeyboardControl::with_release_timeout(KEY_HOLD_FALLBACK_MS)
    };
    let mut controller = GameController::new(config, surface).with_keyboard(keyboard);
    let mut menu = GameOverMenu::default();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| draw_ui(f, &controller, &menu))?;

        if event::poll(Duration::from_millis(REALTIME_FRAME_MS))? {
            // Drain everything queued so held-key state is current
            loop {
                if let Event::Key(key) = event::read()? {
                    if handle_key_event(key, &mut controller, &mut menu) == InputResult::Quit {
                        log::info!("Quit (high score {})", controller.model.high_score);
                        return Ok(());
                    }
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        // Carry sub-millisecond remainders into the next frame; after a stall,
        // resume from now instead of replaying the lost time
        let elapsed_ms = last_frame.elapsed().as_millis() as u64;
        let dt_ms = elapsed_ms.min(MAX_FRAME_DELTA_MS);
        if elapsed_ms > MAX_FRAME_DELTA_MS {
            last_frame = Instant::now();
        } else {
            last_frame += Duration::from_millis(dt_ms);
        }

        for game_event in controller.advance(dt_ms, rng) {
            log::trace!("{:?}", game_event);
        }

        if controller.quit_requested() {
            return Ok(());
        }
    }
}
