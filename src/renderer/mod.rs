//! Rendering module
//!
//! `scene` turns game state into draw primitives; `canvas` paints them with
//! the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

pub use scene::{Color, DrawCommand, Scene, TextAlign, build_scene};
