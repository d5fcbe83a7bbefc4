use std::{
    io::{Stdout, stdout},
    panic,
};

use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::Result;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enters raw mode on the alternate screen. A panic leaves both before the
/// message is printed so the shell stays usable.
pub fn setup_terminal() -> Result<AppTerminal> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave_screen(&mut stdout());
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<()> {
    leave_screen(terminal.backend_mut())?;
    terminal.show_cursor()?;
    Ok(())
}

fn leave_screen(out: &mut impl std::io::Write) -> std::io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(out, LeaveAlternateScreen)
}
