//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (held-key map)

pub mod input;

pub use input::KeyState;
