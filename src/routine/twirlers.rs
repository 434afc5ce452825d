//! Counter-rotating twirlers with additive blending and fading trails.
//!
//! N markers spin at a rate locked to the beat phase; odd-numbered
//! markers optionally run the opposite way. Markers blend into whatever
//! is already lit instead of overwriting it, and a global fade each
//! frame turns their paths into trails.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::{Rgb, blend_colors};
use crate::math8::{map_range, scale8};
use crate::ring::fade_all;

const CLOCKWISE_COLOR: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const ANTICLOCKWISE_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

#[derive(Debug, Clone)]
pub struct TwirlersRoutine {
    count: u8,
    opposing: bool,
}

impl TwirlersRoutine {
    pub const fn new(count: u8, opposing: bool) -> Self {
        Self { count, opposing }
    }
}

impl Routine for TwirlersRoutine {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let advice = TickAdvice {
            next_interval: Duration::from_millis(1),
            brightness: ctx.max_brightness,
        };
        let n = leds.len();
        if n == 0 || self.count == 0 {
            return advice;
        }

        // More twirlers spin slower so the visual speed stays comparable.
        let speed_correction = if self.count == 1 { 1 } else { self.count / 2 };
        let beat = ctx.tempo.beat8_div(speed_correction);

        let clockwise_first = usize::from(scale8(n as u8, beat)) % n;
        let anticlockwise_first = (n - clockwise_first) % n;
        let spacing = n / usize::from(self.count);

        // Longer trails when there are fewer markers to leave them.
        let keep = map_range(i32::from(self.count), 1, 6, 250, 230).clamp(0, 255) as u8;
        fade_all(leds, keep);

        for i in 0..usize::from(self.count) {
            let (first, color) = if i % 2 == 0 {
                (clockwise_first, CLOCKWISE_COLOR)
            } else if self.opposing {
                (anticlockwise_first, ANTICLOCKWISE_COLOR)
            } else {
                (clockwise_first, ANTICLOCKWISE_COLOR)
            };

            let pos = (first + spacing * i) % n;
            // Don't blend with black; the marker would just go dim.
            leds[pos] = if leds[pos] == BLACK {
                color
            } else {
                blend_colors(leds[pos], color, 128)
            };
        }

        advice
    }
}
