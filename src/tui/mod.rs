//! Interactive folder picker
//!
//! Browse to a folder, toggle whether non-PDF files are copied, and run the
//! batch while a worker thread streams progress back to the screen.

use std::{
    io::{self, Stdout},
    path::Path,
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{config::StripConfig, error::Result};

pub mod app;
pub mod explorer;
pub mod ui;

pub use app::{App, Mode, WorkerMessage};
pub use explorer::Explorer;

const TICK: Duration = Duration::from_millis(100);

type Backend = CrosstermBackend<Stdout>;

/// Run the picker starting in `start` until the user quits
pub fn run(config: StripConfig, start: &Path) -> Result<()> {
    let mut app = App::new(config, start)?;
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, &mut app);
    app.shutdown();
    restore_terminal(&mut terminal)?;
    result
}

fn event_loop(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        app.poll_worker();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<Backend>> {
    with_raw_mode(enter_screen)
}

/// Enables raw mode around `enter`, undoing it when `enter` fails
fn with_raw_mode<T>(enter: impl FnOnce() -> io::Result<T>) -> Result<T> {
    enable_raw_mode()?;
    enter().map_err(|e| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        e.into()
    })
}

fn enter_screen() -> io::Result<Terminal<Backend>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
