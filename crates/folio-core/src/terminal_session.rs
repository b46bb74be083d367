#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! [`TerminalSession`] holds the terminal in raw mode (plus the alternate
//! screen and pointer capture when asked) for as long as the page is
//! mounted. Each mode is pushed onto a stack as it is enabled and popped in
//! reverse on [`Drop`], so a session that fails half-way through
//! construction still restores exactly what it changed. A panic hook covers
//! the case where the session is never dropped.
//!
//! ```no_run
//! use folio_core::terminal_session::{SessionOptions, TerminalSession};
//!
//! let session = TerminalSession::new(SessionOptions {
//!     alternate_screen: true,
//!     mouse_capture: true,
//! })?;
//! let (cols, rows) = session.size()?;
//! drop(session); // terminal restored
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crate::event::Event;

/// Terminal modes to enable for a session. All default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer, preserving scrollback.
    pub alternate_screen: bool,
    /// Report pointer moves, clicks and wheel events.
    pub mouse_capture: bool,
}

/// One terminal mode the session switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Raw,
    AlternateScreen,
    MouseCapture,
    HiddenCursor,
}

impl Mode {
    fn enable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Raw => crossterm::terminal::enable_raw_mode(),
            Self::AlternateScreen => {
                crossterm::execute!(out, crossterm::terminal::EnterAlternateScreen)
            }
            Self::MouseCapture => crossterm::execute!(out, crossterm::event::EnableMouseCapture),
            Self::HiddenCursor => crossterm::execute!(out, crossterm::cursor::Hide),
        }
    }

    fn disable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Raw => crossterm::terminal::disable_raw_mode(),
            Self::AlternateScreen => {
                crossterm::execute!(out, crossterm::terminal::LeaveAlternateScreen)
            }
            Self::MouseCapture => crossterm::execute!(out, crossterm::event::DisableMouseCapture),
            Self::HiddenCursor => crossterm::execute!(out, crossterm::cursor::Show),
        }
    }
}

/// Modes to switch on, in order.
fn plan(options: SessionOptions) -> Vec<Mode> {
    let mut modes = vec![Mode::Raw];
    if options.alternate_screen {
        modes.push(Mode::AlternateScreen);
    }
    if options.mouse_capture {
        modes.push(Mode::MouseCapture);
    }
    modes.push(Mode::HiddenCursor);
    modes
}

/// RAII guard over terminal modes.
#[derive(Debug)]
pub struct TerminalSession {
    enabled: Vec<Mode>,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested modes.
    ///
    /// # Errors
    ///
    /// Returns the first mode that fails to switch on. Modes enabled before
    /// it are restored before returning.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        let mut session = Self {
            enabled: Vec::with_capacity(4),
        };
        let mut stdout = io::stdout();
        for mode in plan(options) {
            mode.enable(&mut stdout)?;
            #[cfg(feature = "tracing")]
            tracing::info!(?mode, "terminal mode enabled");
            session.enabled.push(mode);
        }
        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for input. `Ok(false)` on timeout.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event, blocking. `Ok(None)` for input the page ignores.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(crossterm::event::read()?))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        while let Some(mode) = self.enabled.pop() {
            let _ = mode.disable(&mut stdout);
            #[cfg(feature = "tracing")]
            tracing::info!(?mode, "terminal mode restored");
        }
        let _ = stdout.flush();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut stdout = io::stdout();
            for mode in plan(SessionOptions {
                alternate_screen: true,
                mouse_capture: true,
            })
            .into_iter()
            .rev()
            {
                let _ = mode.disable(&mut stdout);
            }
            let _ = stdout.flush();
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_enable_only_raw_mode() {
        assert_eq!(plan(SessionOptions::default()), vec![Mode::Raw, Mode::HiddenCursor]);
    }

    #[test]
    fn alternate_screen_precedes_mouse_capture() {
        let modes = plan(SessionOptions {
            alternate_screen: true,
            mouse_capture: true,
        });
        assert_eq!(
            modes,
            vec![
                Mode::Raw,
                Mode::AlternateScreen,
                Mode::MouseCapture,
                Mode::HiddenCursor
            ]
        );
    }
}
