//! Lịch - Entry Point
//!
//! Initializes the terminal, mounts the screen, and runs the event loop.

use std::env;
use std::io;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use lich::config::{config_path, load_config, save_config, ScreenConfig};
use lich::orientation::{Dimensions, WindowSize};
use lich::ui::{App, Effect};
use lich::SelectedDate;

fn main() -> Result<()> {
    // The log file is named in the config, so the config is read first and
    // its outcome logged once the logger exists
    let config_load = load_config();
    let config = config_load.config();
    init_logging(&config.log_path())?;

    log::info!("Starting Lịch v{}", env!("CARGO_PKG_VERSION"));
    config_load.log();

    if env::args().skip(1).any(|arg| arg == "--write-config") {
        let path = config_path();
        save_config(&path, &config)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if config.mouse {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config);

    // Restore terminal
    disable_raw_mode()?;
    if config.mouse {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Exited with error: {:#}", e);
        eprintln!("Error: {:#}", e);
    }

    log::info!("Lịch shut down cleanly");
    result
}

/// Log to a file so output never draws over the screen
fn init_logging(path: &Path) -> Result<()> {
    let log_file = open_log(path)?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();
    Ok(())
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .or_else(|_| OpenOptions::new().write(true).open("/dev/null"))
        .with_context(|| format!("cannot open log file {}", path.display()))
}

/// Mount the screen and run the event loop until quit
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: &ScreenConfig) -> Result<()> {
    let cell_aspect = config.effective_cell_aspect();
    let mut dimensions = Dimensions::new();
    let (columns, rows) = terminal::size()?;
    dimensions.emit(WindowSize::from_cells(columns, rows, cell_aspect));

    let mut app = App::mount(&dimensions, config, SelectedDate::today());
    let result = event_loop(terminal, &mut app, &mut dimensions, config);

    let unmounted = app.unmount(terminal.backend_mut());
    shutdown_result(result, unmounted)
}

/// Combine the event loop and unmount results, keeping the loop's error
fn shutdown_result(result: Result<()>, unmounted: io::Result<()>) -> Result<()> {
    match (result, unmounted) {
        (Err(e), Err(unmount_err)) => {
            log::error!("Failed to clear terminal images: {}", unmount_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), unmounted) => unmounted.context("failed to clear terminal images"),
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dimensions: &mut Dimensions,
    config: &ScreenConfig,
) -> Result<()> {
    let tick_rate = config.tick_rate();
    let cell_aspect = config.effective_cell_aspect();
    let mut last_tick = Instant::now();

    loop {
        app.sync_dimensions();
        terminal.draw(|frame| app.render(frame))?;
        app.place_images(terminal.backend_mut())?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let effect = match event::read()? {
                // Only handle key press events, not releases
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(columns, rows) => {
                    log::debug!("Terminal resized to {}x{}", columns, rows);
                    dimensions.emit(WindowSize::from_cells(columns, rows, cell_aspect));
                    Effect::None
                }
                _ => Effect::None,
            };

            if effect == Effect::Quit {
                break;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}
