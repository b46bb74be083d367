#![forbid(unsafe_code)]

//! The AI Book Generator landing page, rendered in the terminal.
//!
//! - [`showcase`]: the technology tabs with keyed exit-then-enter panel
//!   transitions and pointer parallax
//! - [`sections`]: hero, feature grid, journey, FAQ, navbar
//! - [`app`]: the page [`Model`](folio_runtime::Model) tying them together
//! - [`content`] and [`theme`]: static copy and palette

pub mod app;
pub mod cli;
pub mod content;
pub mod sections;
pub mod showcase;
pub mod theme;

pub use app::{LandingModel, Msg};
