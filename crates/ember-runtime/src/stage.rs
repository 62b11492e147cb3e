//! Presentation-engine interface consumed by the core.
//!
//! Window creation, real device polling, rendering primitives and frame
//! pacing all live behind this trait. The scheduler and the hooks it
//! dispatches never talk to a window system directly, which is what lets the
//! whole pipeline run headless in tests.

use ember_core::{Color, TextAlign};
use winit::keyboard::KeyCode;

/// What the core needs from the embedding presentation engine.
///
/// Draw methods are invoked during the draw pass purely for side effect; no
/// return value is consumed. The engine may call
/// [`FrameScheduler::tick`](crate::FrameScheduler::tick) several times before
/// presenting a frame — the core is tick-counted and does not care.
pub trait Stage {
    /// Instantaneous key-down state.
    fn key_down(&self, key: KeyCode) -> bool;

    /// Clear a key so it does not re-trigger until released and pressed
    /// again (edge-triggered input).
    fn consume_key(&mut self, key: KeyCode);

    /// Uniform random integer in `min..=max`.
    fn random_int(&mut self, min: i32, max: i32) -> i32;

    /// Logical playfield dimensions.
    fn playfield_width(&self) -> f64;
    fn playfield_height(&self) -> f64;

    /// Visible view dimensions (may differ from the playfield).
    fn view_width(&self) -> f64;
    fn view_height(&self) -> f64;

    fn draw_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign, color: Color);
    fn draw_oval(&mut self, x: f64, y: f64, w: f64, h: f64, filled: bool, color: Color);
    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, filled: bool, color: Color);
}
