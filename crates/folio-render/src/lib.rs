#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames with hit regions, text measurement,
//! and ANSI presentation.

pub mod buffer;
pub mod cell;
pub mod frame;
#[cfg(not(target_arch = "wasm32"))]
pub mod presenter;
pub mod text;

pub use buffer::Buffer;
pub use cell::{Cell, PackedRgba, Style, StyleFlags};
pub use frame::{Frame, HitId};
