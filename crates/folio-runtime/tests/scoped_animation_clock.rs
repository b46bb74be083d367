//! A model that animates only declares the frame clock while it moves, and
//! the manager tears the clock down as soon as it is dropped from the list.

use std::time::Duration;

use folio_core::event::{Event, KeyCode};
use folio_render::frame::Frame;
use folio_runtime::{AnimationFrames, Cmd, Model, ProgramSimulator, Subscription, SubscriptionManager};
use proptest::prelude::*;

struct Spinner {
    remaining: Duration,
}

#[derive(Debug)]
enum Msg {
    Start,
    Frame(Duration),
    Other,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(k) if k.code == KeyCode::Enter => Msg::Start,
            _ => Msg::Other,
        }
    }
}

impl Model for Spinner {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Start => self.remaining = Duration::from_millis(100),
            Msg::Frame(dt) => self.remaining = self.remaining.saturating_sub(dt),
            Msg::Other => {}
        }
        Cmd::none()
    }

    fn view(&self, _frame: &mut Frame) {}

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
        if self.remaining.is_zero() {
            vec![]
        } else {
            vec![Box::new(AnimationFrames::new(AnimationFrames::<Msg>::DEFAULT_INTERVAL, Msg::Frame))]
        }
    }
}

#[test]
fn clock_declared_only_while_animating() {
    let mut sim = ProgramSimulator::new(Spinner {
        remaining: Duration::ZERO,
    });
    sim.init();
    assert!(sim.subscription_ids().is_empty());

    sim.inject_event(Event::key(KeyCode::Enter));
    assert_eq!(sim.subscription_ids(), &[AnimationFrames::<Msg>::ID]);

    for _ in 0..7 {
        sim.send(Msg::Frame(Duration::from_millis(16)));
    }
    assert!(sim.subscription_ids().is_empty());
}

#[test]
fn manager_stops_clock_when_undeclared() {
    let mut model = Spinner {
        remaining: Duration::ZERO,
    };
    let mut mgr = SubscriptionManager::new();
    model.update(Msg::Start);
    mgr.reconcile(model.subscriptions());
    assert_eq!(mgr.active_count(), 1);

    let frames = mgr.wait_messages(Duration::from_secs(2));
    assert!(!frames.is_empty());

    model.update(Msg::Frame(Duration::from_secs(1)));
    mgr.reconcile(model.subscriptions());
    assert_eq!(mgr.active_count(), 0);
}

proptest! {
    #[test]
    fn clock_always_stops_eventually(steps in proptest::collection::vec(1u64..40, 1..30)) {
        let mut sim = ProgramSimulator::new(Spinner { remaining: Duration::ZERO });
        sim.send(Msg::Start);
        let mut total = 0;
        for ms in steps {
            total += ms;
            sim.send(Msg::Frame(Duration::from_millis(ms)));
            prop_assert_eq!(sim.subscription_ids().is_empty(), total >= 100);
        }
    }
}
