#![forbid(unsafe_code)]

//! Core: events, geometry, animation primitives, pointer parallax, and the
//! terminal session guard.

pub mod animation;
pub mod event;
pub mod event_coalescer;
pub mod geometry;
pub mod logging;
pub mod parallax;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal_session;

#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
