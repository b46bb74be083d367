#![forbid(unsafe_code)]

//! Headless driver for a [`Model`].
//!
//! The simulator feeds events and messages straight into `update`, renders
//! on demand into an in-memory [`Frame`], and keeps those frames so tests
//! can read text and resolve clicks against hit regions. Subscriptions are
//! not started. After every update the simulator records which ids the
//! model declared, which is how tests check that the frame clock only runs
//! while something animates. Time only moves when a test sends a frame
//! message itself.

use folio_core::event::Event;
use folio_render::buffer::Buffer;
use folio_render::frame::{Frame, HitData, HitId};

use crate::program::{Cmd, Model};
use crate::subscription::SubId;

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Quit command.
    Quit,
    /// Message sent to model (not stored, just noted).
    Msg,
    /// Batch of commands.
    Batch(usize),
}

/// Deterministic simulator for [`Model`] testing.
pub struct ProgramSimulator<M: Model> {
    model: M,
    frames: Vec<Frame>,
    command_log: Vec<CmdRecord>,
    subscription_ids: Vec<SubId>,
    running: bool,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            frames: Vec::new(),
            command_log: Vec::new(),
            subscription_ids: Vec::new(),
            running: true,
        }
    }

    /// Initialize the model by calling `Model::init()` and executing returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.record_subscriptions();
    }

    /// Inject terminal events into the model.
    ///
    /// Each event is converted to a message via `From<Event>` and dispatched
    /// through `Model::update()`.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            let cmd = self.model.update(M::Message::from(event.clone()));
            self.execute_cmd(cmd);
            self.record_subscriptions();
        }
    }

    /// Inject a single terminal event into the model.
    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Send a specific message to the model.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
        self.record_subscriptions();
    }

    /// Render the model at the given size and keep the frame.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.frames.push(frame);
        let last = self.frames.len() - 1;
        &self.frames[last].buffer
    }

    /// Resolve a cell against the most recent frame's hit regions.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitData)> {
        self.frames.last().and_then(|f| f.hit_test(x, y))
    }

    /// Get the number of captured frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Get a reference to the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Returns `false` after a `Cmd::Quit` has been executed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// IDs of the subscriptions the model declared after the last update.
    pub fn subscription_ids(&self) -> &[SubId] {
        &self.subscription_ids
    }

    /// Get the command execution log.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    fn record_subscriptions(&mut self) {
        self.subscription_ids = self.model.subscriptions().iter().map(|s| s.id()).collect();
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::{AnimationFrames, Subscription};
    use folio_core::event::KeyCode;
    use folio_core::geometry::Rect;
    use folio_render::cell::Style;
    use std::time::Duration;

    const TAB: HitId = HitId::new(1);

    /// Three tabs; switching fades the label in over 100ms.
    struct Tabs {
        active: usize,
        fade_left: Duration,
        initialized: bool,
    }

    #[derive(Debug)]
    enum TabsMsg {
        Select(usize),
        Next,
        Cycle,
        Frame(Duration),
        Quit,
        Ignored,
    }

    impl From<Event> for TabsMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(k) if k.code == KeyCode::Tab => TabsMsg::Next,
                Event::Key(k) if k.is_char('c') => TabsMsg::Cycle,
                Event::Key(k) if k.is_char('q') => TabsMsg::Quit,
                _ => TabsMsg::Ignored,
            }
        }
    }

    impl Model for Tabs {
        type Message = TabsMsg;

        fn init(&mut self) -> Cmd<TabsMsg> {
            self.initialized = true;
            Cmd::none()
        }

        fn update(&mut self, msg: TabsMsg) -> Cmd<TabsMsg> {
            match msg {
                TabsMsg::Select(i) => {
                    if i != self.active {
                        self.active = i;
                        self.fade_left = Duration::from_millis(100);
                    }
                }
                TabsMsg::Next => return Cmd::msg(TabsMsg::Select((self.active + 1) % 3)),
                TabsMsg::Cycle => {
                    return Cmd::batch(vec![Cmd::msg(TabsMsg::Next), Cmd::msg(TabsMsg::Next)]);
                }
                TabsMsg::Frame(dt) => self.fade_left = self.fade_left.saturating_sub(dt),
                TabsMsg::Quit => return Cmd::quit(),
                TabsMsg::Ignored => {}
            }
            Cmd::none()
        }

        fn view(&self, frame: &mut Frame) {
            let max_x = frame.width();
            for i in 0..3u16 {
                let marker = if usize::from(i) == self.active { "*" } else { "-" };
                frame
                    .buffer
                    .set_string(i * 4, 0, &format!("[{marker}]"), Style::new(), max_x);
                frame.register_hit(Rect::new(i * 4, 0, 3, 1), TAB, u64::from(i));
            }
        }

        fn subscriptions(&self) -> Vec<Box<dyn Subscription<TabsMsg>>> {
            if self.fade_left.is_zero() {
                vec![]
            } else {
                vec![Box::new(AnimationFrames::new(Duration::from_millis(16), TabsMsg::Frame))]
            }
        }
    }

    fn tabs() -> Tabs {
        Tabs {
            active: 0,
            fade_left: Duration::ZERO,
            initialized: false,
        }
    }

    #[test]
    fn init_runs_model_init() {
        let mut sim = ProgramSimulator::new(tabs());
        sim.init();
        assert!(sim.model().initialized);
        assert_eq!(sim.command_log(), &[CmdRecord::None]);
    }

    #[test]
    fn message_commands_feed_back_into_update() {
        let mut sim = ProgramSimulator::new(tabs());
        sim.inject_event(Event::key(KeyCode::Tab));
        assert_eq!(sim.model().active, 1);
        sim.inject_event(Event::key(KeyCode::Char('c')));
        assert_eq!(sim.model().active, 0);
        assert!(sim.command_log().contains(&CmdRecord::Batch(2)));
    }

    #[test]
    fn quit_drops_later_events() {
        let mut sim = ProgramSimulator::new(tabs());
        sim.inject_events(&[Event::key(KeyCode::Char('q')), Event::key(KeyCode::Tab)]);
        assert!(!sim.is_running());
        assert_eq!(sim.model().active, 0);
        sim.send(TabsMsg::Select(2));
        assert_eq!(sim.model().active, 0);
    }

    #[test]
    fn captured_frame_resolves_hits() {
        let mut sim = ProgramSimulator::new(tabs());
        assert_eq!(sim.hit_test(0, 0), None);
        let text = sim.capture_frame(12, 1).to_text();
        assert!(text.starts_with("[*] [-] [-]"), "got {text:?}");
        assert_eq!(sim.hit_test(9, 0), Some((TAB, 2)));
        assert_eq!(sim.hit_test(3, 0), None);
        assert_eq!(sim.frame_count(), 1);
    }

    #[test]
    fn frame_clock_declared_only_while_fading() {
        let mut sim = ProgramSimulator::new(tabs());
        sim.init();
        assert!(sim.subscription_ids().is_empty());
        sim.send(TabsMsg::Select(1));
        assert_eq!(sim.subscription_ids(), &[AnimationFrames::<TabsMsg>::ID]);
        sim.send(TabsMsg::Frame(Duration::from_millis(60)));
        assert_eq!(sim.subscription_ids().len(), 1);
        sim.send(TabsMsg::Frame(Duration::from_millis(60)));
        assert!(sim.subscription_ids().is_empty());
    }
}
