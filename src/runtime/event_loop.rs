use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::PlaybackState;
use crate::config;
use crate::controller::{Direction, PlaybackController, StateUpdate};
use crate::mpris::ControlCmd;
use crate::runtime::startup::display_titles;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: handles input, UI drawing and MPRIS commands.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController,
    control_rx: &mpsc::Receiver<ControlCmd>,
    updates: &mpsc::Receiver<StateUpdate>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Pick up sessions that ended on their own, then fold every update
        // emitted since the last frame into the view.
        controller.sync();
        while let Ok(update) = updates.try_recv() {
            app.apply(&update);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, controller) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, controller, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn play(app: &mut App, controller: &mut PlaybackController) {
    app.clear_message();
    if let Err(e) = controller.play_current() {
        log::debug!("play: {e}");
        app.report(&e);
    }
}

fn stop(app: &mut App, controller: &mut PlaybackController) {
    // A successful stop is announced by the Playing -> Stopped update.
    if !controller.stop_current() {
        app.set_message("Nothing is playing.");
    }
}

fn navigate(app: &mut App, controller: &mut PlaybackController, direction: Direction) {
    if controller.navigate(direction) {
        app.clear_message();
    }
}

fn handle_control_cmd(cmd: ControlCmd, app: &mut App, controller: &mut PlaybackController) -> bool {
    log::debug!("MPRIS command: {cmd:?}");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => play(app, controller),
        ControlCmd::Pause | ControlCmd::Stop => stop(app, controller),
        ControlCmd::PlayPause => {
            if controller.state() == PlaybackState::Playing {
                stop(app, controller);
            } else {
                play(app, controller);
            }
        }
        ControlCmd::Next => navigate(app, controller, Direction::Next),
        ControlCmd::Prev => navigate(app, controller, Direction::Previous),
    }
    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                navigate(app, controller, Direction::First);
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Home => navigate(app, controller, Direction::First),
        KeyCode::Char('G') | KeyCode::End => navigate(app, controller, Direction::Last),
        KeyCode::Char('j') | KeyCode::Down => navigate(app, controller, Direction::Next),
        KeyCode::Char('k') | KeyCode::Up => navigate(app, controller, Direction::Previous),
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char(' ') => play(app, controller),
        KeyCode::Char('s') => stop(app, controller),
        KeyCode::Char('R') => {
            controller.reload_titles(&settings.library.titles_path());
            app.set_titles(display_titles(controller));
            app.set_message(format!(
                "Reloaded {} title(s).",
                controller.catalog().len()
            ));
        }
        _ => {}
    }

    false
}
