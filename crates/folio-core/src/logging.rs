#![forbid(unsafe_code)]

//! Logging facade for crates that keep `tracing` optional.
//!
//! With the `tracing` feature, `folio_core::{debug, trace}` are the
//! `tracing` macros. Without it they expand to nothing, so layout and
//! render code can log unconditionally.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod disabled {
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
