mod action;
mod app;
mod components;
mod tui;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing_subscriber::EnvFilter;

use calllog_report::Settings;

use crate::action::Action;
use crate::app::{App, ModalState};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Cause chain always; backtrace only with RUST_BACKTRACE=1 (see help modal)
            println!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let source = match std::env::args_os().nth(1) {
        Some(arg) => Some(PathBuf::from(arg)),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            pick_file(&cwd)?
        }
    };

    // Logging starts after the terminal is restored
    init_logging();

    let Some(source) = source else {
        return Ok(());
    };

    println!();
    println!("Start");
    let settings = Settings::discover()?;
    calllog_report::run(&source, &settings)
        .context(format!("Failed to build report from {:?}", source))?;
    println!("Done");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the file picker; `None` when the user cancels
fn pick_file(start_dir: &std::path::Path) -> Result<Option<PathBuf>> {
    let mut app = App::new(start_dir)?;
    let mut terminal = tui::init()?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    tui::restore()?;
    result?;

    Ok(app.chosen)
}

fn event_loop(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| app.render(frame))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let action = handle_key_event(app, key);
            app.handle_action(action)?;
        }
    }
    Ok(())
}

/// Convert key events to actions based on current state
fn handle_key_event(app: &App, key: event::KeyEvent) -> Action {
    if app.modal != ModalState::None {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::CloseModal,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Action::Open,
        KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => Action::Parent,
        _ => Action::None,
    }
}
