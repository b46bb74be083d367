#![forbid(unsafe_code)]

//! Subscription system for continuous event sources.
//!
//! Subscriptions are declared, not started. The runtime calls
//! `Model::subscriptions()` after every update, compares the returned IDs
//! against what is running, starts the new ones and stops the ones that
//! disappeared. A model that only declares [`AnimationFrames`] while
//! something is moving therefore pays nothing when the page is idle.
//!
//! Every running subscription owns a [`StopSignal`]; dropping the manager or
//! the running handle trips it, so no subscription outlives its owner.

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// A unique identifier for a subscription.
///
/// Subscriptions with equal IDs are considered the same subscription, so a
/// re-declared subscription keeps running instead of restarting.
pub type SubId = u64;

/// A subscription produces messages from an external event source.
///
/// `run` is called on a background thread and should loop until the
/// [`StopSignal`] fires or the channel disconnects.
pub trait Subscription<M: Send + 'static>: Send {
    /// Unique identifier for deduplication.
    fn id(&self) -> SubId;

    /// Produce messages until stopped.
    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal);
}

/// Signal for stopping a subscription.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a signal and the trigger that fires it.
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            StopTrigger { inner },
        )
    }

    /// Whether the signal has fired.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for the signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if the timeout elapsed. Spurious
    /// wakeups are absorbed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();
        loop {
            if *stopped {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, duration - elapsed)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
        }
    }
}

/// Runtime-side handle that fires a [`StopSignal`].
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }
}

struct RunningSubscription {
    id: SubId,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningSubscription {
    /// Stop and join.
    fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RunningSubscription {
    fn drop(&mut self) {
        // Don't join in drop to avoid blocking.
        self.trigger.stop();
    }
}

/// Starts, stops, and drains the subscriptions a model declares.
pub struct SubscriptionManager<M: Send + 'static> {
    active: Vec<RunningSubscription>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> SubscriptionManager<M> {
    /// Create a manager with nothing running.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            active: Vec::new(),
            sender,
            receiver,
        }
    }

    /// Bring the running set in line with `subscriptions`.
    ///
    /// - Starts subscriptions whose ID is not running
    /// - Stops running subscriptions whose ID is not declared
    /// - Leaves the rest untouched
    pub fn reconcile(&mut self, subscriptions: Vec<Box<dyn Subscription<M>>>) {
        let declared: HashSet<SubId> = subscriptions.iter().map(|s| s.id()).collect();
        let before = self.active.len();

        let mut kept = Vec::with_capacity(self.active.len());
        for running in self.active.drain(..) {
            if declared.contains(&running.id) {
                kept.push(running);
            } else {
                debug!(sub_id = running.id, "stopping subscription");
                running.stop();
            }
        }
        self.active = kept;

        let mut running_ids: HashSet<SubId> = self.active.iter().map(|r| r.id).collect();
        for sub in subscriptions {
            let id = sub.id();
            if !running_ids.insert(id) {
                continue;
            }
            debug!(sub_id = id, "starting subscription");
            let (signal, trigger) = StopSignal::new();
            let sender = self.sender.clone();
            let thread = thread::spawn(move || sub.run(sender, signal));
            self.active.push(RunningSubscription {
                id,
                trigger,
                thread: Some(thread),
            });
        }

        trace!(
            active_before = before,
            active_after = self.active.len(),
            "subscription reconcile complete"
        );
    }

    /// Take every message sent since the last drain.
    pub fn drain_messages(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }

    /// Wait up to `timeout` for the first message, then drain the rest.
    pub fn wait_messages(&self, timeout: Duration) -> Vec<M> {
        match self.receiver.recv_timeout(timeout) {
            Ok(first) => std::iter::once(first)
                .chain(self.receiver.try_iter())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// IDs of running subscriptions.
    pub fn active_ids(&self) -> Vec<SubId> {
        self.active.iter().map(|r| r.id).collect()
    }

    /// Number of running subscriptions.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Stop everything.
    pub fn stop_all(&mut self) {
        for running in self.active.drain(..) {
            running.stop();
        }
    }
}

impl<M: Send + 'static> Default for SubscriptionManager<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send + 'static> Drop for SubscriptionManager<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

// --- Built-in subscriptions ---

/// Animation clock: fires every `interval` with the real time elapsed since
/// the previous frame.
///
/// Declare it only while something is animating; the runtime stops it as
/// soon as it is no longer declared.
pub struct AnimationFrames<M: Send + 'static> {
    interval: Duration,
    make_msg: Box<dyn Fn(Duration) -> M + Send + Sync>,
}

impl<M: Send + 'static> AnimationFrames<M> {
    /// ID shared by every animation clock; a model runs at most one.
    pub const ID: SubId = 0x4652_414D_4553; // "FRAMES"

    /// Roughly 60 frames per second.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

    /// Create a frame clock.
    pub fn new(interval: Duration, make_msg: impl Fn(Duration) -> M + Send + Sync + 'static) -> Self {
        Self {
            interval,
            make_msg: Box::new(make_msg),
        }
    }
}

impl<M: Send + 'static> Subscription<M> for AnimationFrames<M> {
    fn id(&self) -> SubId {
        Self::ID
    }

    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal) {
        let mut last = Instant::now();
        while !stop.wait_timeout(self.interval) {
            let now = Instant::now();
            let dt = now.duration_since(last);
            last = now;
            if sender.send((self.make_msg)(dt)).is_err() {
                break;
            }
        }
    }
}
