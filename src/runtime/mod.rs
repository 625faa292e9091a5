use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::controller::{StateObserver, StateUpdate};
use crate::mpris::ControlCmd;

mod event_loop;
mod logging;
mod settings;
mod startup;

/// `playdeck [MUSIC_DIR] [TITLE]`
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();

    let mut args = env::args().skip(1);
    if let Some(dir) = args.next() {
        settings.library.music_dir = PathBuf::from(dir);
    }
    let initial_title = args.next();

    if let Some(path) = logging::init(&settings.logging) {
        log::info!("playdeck {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    }

    let (mut controller, startup_message) = startup::build_controller(&settings);

    let (update_tx, update_rx) = mpsc::channel::<StateUpdate>();
    controller.subscribe(update_tx);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris.notify(&controller.snapshot());
    controller.subscribe(mpris);

    let mut app = App::new(startup::display_titles(&controller), &controller.snapshot());
    app.set_current_dir(settings.library.music_dir.display().to_string());
    if let Some(msg) = startup_message {
        app.set_message(msg);
    }
    if let Some(title) = initial_title {
        if !controller.select_title(&title) {
            app.set_message(format!("No track titled {title:?}."));
        }
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        &control_rx,
        &update_rx,
        &mut state,
    );

    controller.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("exiting");
    run_result
}
