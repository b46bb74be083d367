#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop: terminal input,
//! subscription messages and animation frames are delivered to
//! [`Model::update`] in arrival order, and the model is re-rendered after
//! every batch that changed it.
//!
//! ```ignore
//! use folio_core::event::Event;
//! use folio_render::Frame;
//! use folio_runtime::{Cmd, Model};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//!     Ignore,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             Event::Key(k) if k.is_char('+') => Msg::Increment,
//!             _ => Msg::Ignore,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Increment => self.count += 1,
//!             Msg::Quit => return Cmd::quit(),
//!             Msg::Ignore => {}
//!         }
//!         Cmd::none()
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         // draw self.count
//!     }
//! }
//! ```

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use folio_core::event::Event;
use folio_core::event_coalescer::EventCoalescer;
use folio_core::terminal_session::{SessionOptions, TerminalSession};
use folio_render::frame::Frame;
use folio_render::presenter::Presenter;
use folio_render::PackedRgba;
use tracing::{debug, info, info_span};

use crate::subscription::{Subscription, SubscriptionManager};

/// Application state and behaviour.
pub trait Model: Sized {
    /// Messages that drive [`update`](Self::update). Terminal events are
    /// converted with `From<Event>`.
    type Message: From<Event> + Send + 'static;

    /// Called once before the first render.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions that should be running right now.
    ///
    /// Called after every update; the runtime starts and stops
    /// subscriptions to match (by `SubId`). Returning an empty vec stops all
    /// of them.
    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        vec![]
    }
}

/// Side effects requested by [`Model::init`] and [`Model::update`].
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Stop the program after the current batch.
    Quit,
    /// Execute commands in order.
    Batch(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a batch, collapsing empty and single-element batches.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    /// Whether this is [`Cmd::None`].
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Runtime knobs.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Capture pointer events.
    pub mouse: bool,
    /// Render on the alternate screen.
    pub alternate_screen: bool,
    /// Longest time to block waiting for input.
    pub poll_timeout: Duration,
    /// Quit automatically after this long (smoke runs and demos).
    pub exit_after: Option<Duration>,
    /// Colour every cell is composited over.
    pub background: PackedRgba,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            alternate_screen: true,
            poll_timeout: Duration::from_millis(16),
            exit_after: None,
            background: PackedRgba::rgb(12, 10, 24),
        }
    }
}

impl ProgramConfig {
    /// Builder: pointer capture.
    #[must_use]
    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    /// Builder: auto-quit deadline.
    #[must_use]
    pub fn with_exit_after(mut self, exit_after: Option<Duration>) -> Self {
        self.exit_after = exit_after;
        self
    }

    /// Builder: background colour.
    #[must_use]
    pub fn with_background(mut self, background: PackedRgba) -> Self {
        self.background = background;
        self
    }
}

/// Drives a [`Model`] on a real terminal.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
    // Field order matters: the presenter flushes before the session restores
    // the terminal.
    presenter: Presenter<Stdout>,
    session: TerminalSession,
    subscriptions: SubscriptionManager<M::Message>,
    coalescer: EventCoalescer,
    width: u16,
    height: u16,
    running: bool,
    dirty: bool,
    frames: u64,
}

impl<M: Model> Program<M> {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Fails if the terminal cannot enter raw mode or report its size.
    pub fn new(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: config.alternate_screen,
            mouse_capture: config.mouse,
        })?;
        let (width, height) = session.size()?;
        let presenter = Presenter::new(io::stdout(), config.background);
        Ok(Self {
            model,
            config,
            presenter,
            session,
            subscriptions: SubscriptionManager::new(),
            coalescer: EventCoalescer::new(),
            width: width.max(1),
            height: height.max(1),
            running: true,
            dirty: true,
            frames: 0,
        })
    }

    /// Run until the model quits or the deadline passes.
    ///
    /// The initial size is delivered to the model as a resize event before
    /// `init`, so the model never renders at an unknown size.
    pub fn run(mut self) -> io::Result<M> {
        let _span = info_span!("folio.program.run", width = self.width, height = self.height).entered();
        let started = Instant::now();

        self.dispatch(M::Message::from(Event::Resize {
            width: self.width,
            height: self.height,
        }));
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.reconcile_subscriptions();
        self.render_frame()?;

        while self.running {
            if self.session.poll_event(self.config.poll_timeout)? {
                loop {
                    if let Some(event) = self.session.read_event()? {
                        self.handle_event(event);
                    }
                    if !self.running || !self.session.poll_event(Duration::ZERO)? {
                        break;
                    }
                }
            }
            if let Some(pending) = self.coalescer.flush() {
                self.handle_event(pending);
            }

            for msg in self.subscriptions.drain_messages() {
                self.dispatch(msg);
            }

            if self
                .config
                .exit_after
                .is_some_and(|limit| started.elapsed() >= limit)
            {
                info!("exit deadline reached");
                self.running = false;
            }

            if self.dirty {
                self.reconcile_subscriptions();
                self.render_frame()?;
            }
        }

        self.subscriptions.stop_all();
        info!(frames = self.frames, coalesced = self.coalescer.coalesced_count(), "program finished");
        Ok(self.model)
    }

    fn handle_event(&mut self, event: Event) {
        let Some(event) = self.coalescer.push(event) else {
            return;
        };
        // Keep pointer order: a pending move happened before this event.
        if let Some(pending) = self.coalescer.flush() {
            self.dispatch(M::Message::from(pending));
        }
        if let Event::Resize { width, height } = event {
            debug!(width, height, "resize");
            self.width = width.max(1);
            self.height = height.max(1);
            self.presenter.invalidate();
        }
        self.dispatch(M::Message::from(event));
    }

    fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute_cmd(cmd);
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.dispatch(m),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
        }
    }

    fn reconcile_subscriptions(&mut self) {
        let declared = self.model.subscriptions();
        self.subscriptions.reconcile(declared);
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let mut frame = Frame::new(self.width, self.height);
        self.model.view(&mut frame);
        self.presenter.present(&frame.buffer)?;
        self.frames += 1;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_collapses() {
        let c: Cmd<()> = Cmd::batch(vec![]);
        assert!(c.is_none());
        let c: Cmd<()> = Cmd::batch(vec![Cmd::none(), Cmd::quit()]);
        assert!(matches!(c, Cmd::Quit));
        let c: Cmd<()> = Cmd::batch(vec![Cmd::quit(), Cmd::msg(())]);
        assert!(matches!(c, Cmd::Batch(ref v) if v.len() == 2));
    }

    #[test]
    fn default_config_captures_mouse() {
        let cfg = ProgramConfig::default().with_exit_after(Some(Duration::from_secs(1)));
        assert!(cfg.mouse);
        assert_eq!(cfg.exit_after, Some(Duration::from_secs(1)));
        assert!(!cfg.with_mouse(false).mouse);
    }
}
