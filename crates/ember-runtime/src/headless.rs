//! Headless stage: an in-memory presentation engine.
//!
//! Used by the test suite and the scripted demo player. Keys are injected
//! programmatically, randomness comes from a seeded generator, and draw
//! calls are recorded instead of rasterized.

use crate::input::InputState;
use crate::stage::Stage;
use ember_core::{Color, TextAlign};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use winit::keyboard::KeyCode;

/// A recorded draw-pass side effect.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Text {
        text: String,
        x: f64,
        y: f64,
        align: TextAlign,
        color: Color,
    },
    Oval {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        filled: bool,
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        filled: bool,
        color: Color,
    },
}

/// In-memory [`Stage`] with scripted input and recorded output.
pub struct HeadlessStage {
    pub input: InputState,
    rng: SmallRng,
    playfield: (f64, f64),
    view: (f64, f64),
    calls: Vec<DrawCall>,
}

impl HeadlessStage {
    pub fn new(seed: u64) -> Self {
        Self::with_dimensions(seed, (320.0, 240.0), (320.0, 240.0))
    }

    pub fn with_dimensions(seed: u64, playfield: (f64, f64), view: (f64, f64)) -> Self {
        Self {
            input: InputState::new(),
            rng: SmallRng::seed_from_u64(seed),
            playfield,
            view,
            calls: Vec::new(),
        }
    }

    /// Inject a key press, as a real event loop would.
    pub fn press_key(&mut self, key: KeyCode) {
        self.input.process_key_down(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.input.process_key_up(key);
    }

    /// Draw calls recorded since the last drain.
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn drain_draw_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Stage for HeadlessStage {
    fn key_down(&self, key: KeyCode) -> bool {
        self.input.is_key_down(key)
    }

    fn consume_key(&mut self, key: KeyCode) {
        self.input.consume(key);
    }

    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn playfield_width(&self) -> f64 {
        self.playfield.0
    }

    fn playfield_height(&self) -> f64 {
        self.playfield.1
    }

    fn view_width(&self) -> f64 {
        self.view.0
    }

    fn view_height(&self) -> f64 {
        self.view.1
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            align,
            color,
        });
    }

    fn draw_oval(&mut self, x: f64, y: f64, w: f64, h: f64, filled: bool, color: Color) {
        self.calls.push(DrawCall::Oval {
            x,
            y,
            w,
            h,
            filled,
            color,
        });
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, filled: bool, color: Color) {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            w,
            h,
            filled,
            color,
        });
    }
}
