//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Script display with highlighting and current statement indicator
//! - [`slots`]: Slot buffer visualization (live slots, empty range, capacity)
//! - [`log`]: Outcome of every executed operation
//! - [`status`]: Status bar with keybindings and run state
//!
//! Each pane module exports a primary `render_*` function and, where the pane
//! scrolls, its scroll state type.

pub mod log;
pub mod slots;
pub mod source;
pub mod status;

pub use log::render_log_pane;
pub use slots::{render_slots_pane, SlotsScrollState};
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
