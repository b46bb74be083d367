#![forbid(unsafe_code)]

//! Elm-style runtime for Folio: the update/view loop, subscriptions with
//! scoped lifetimes, and a deterministic simulator for tests.

pub mod program;
pub mod simulator;
pub mod subscription;

pub use program::{Cmd, Model, Program, ProgramConfig};
pub use simulator::ProgramSimulator;
pub use subscription::{AnimationFrames, StopSignal, SubId, Subscription, SubscriptionManager};
