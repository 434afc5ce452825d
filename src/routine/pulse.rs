//! Gradient pulses that breathe with the beat.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::{Hsv, Rgb};
use crate::math8::{beatsin8, map_range};
use crate::ring::{fill_gradient_ring, fill_solid};

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Maximum half-width of the pulse, in pixels
const PULSE_WIDTH: u8 = 10;

/// One pulse breathing at double beat rate, re-anchoring to a pseudo
/// random position every time it collapses to a point.
#[derive(Debug, Clone, Default)]
pub struct Pulse3Routine {
    middle: i32,
}

impl Pulse3Routine {
    pub const fn new() -> Self {
        Self { middle: 0 }
    }
}

impl Routine for Pulse3Routine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let width = i32::from(ctx.tempo.beatsin8_mul(2, 0, PULSE_WIDTH));
        let hue = beatsin8(1, 0, 255, ctx.now);

        if width == 1 {
            // The pulse is invisible right now; safe to jump it.
            self.middle = (ctx.run_counter % 60 + ctx.run_counter % 2) as i32;
        }

        fill_solid(leds, BLACK);
        let dark = Hsv {
            hue,
            sat: 255,
            val: 0,
        };
        let bright = Hsv {
            hue,
            sat: 255,
            val: 255,
        };
        fill_gradient_ring(leds, self.middle - width, dark, self.middle, bright);
        fill_gradient_ring(leds, self.middle, bright, self.middle + width, dark);

        TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        }
    }

    fn reset(&mut self) {
        self.middle = 0;
    }
}

/// N evenly spaced pulses breathing at beat rate while the whole group
/// drifts slowly around the ring, optionally capped with red lead dots.
#[derive(Debug, Clone)]
pub struct Pulse5Routine {
    count: u8,
    leading_dot: bool,
}

impl Pulse5Routine {
    pub const fn new(count: u8, leading_dot: bool) -> Self {
        Self { count, leading_dot }
    }
}

impl Routine for Pulse5Routine {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let advice = TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        };
        let n = leds.len();
        if n == 0 || self.count == 0 {
            return advice;
        }

        let spacing = (n / usize::from(self.count)) as i32;
        // Leave at least one dark pixel between pulses at full width.
        let pulse_width = ((spacing / 2) - 1).max(1);

        let middle = i32::from(beatsin8(10, 0, (n / 2) as u8, ctx.now));
        let width = i32::from(ctx.tempo.beatsin8(0, pulse_width.min(255) as u8));
        let hue = ctx.motion.map_or(180, |motion| {
            map_range(i32::from(motion.yaw), 0, 360, 0, 255).clamp(0, 255) as u8
        });

        fill_solid(leds, BLACK);

        let dark = Hsv {
            hue,
            sat: 255,
            val: 0,
        };
        let bright = Hsv {
            hue,
            sat: 255,
            val: 255,
        };
        let red = Hsv {
            hue: 0,
            sat: 255,
            val: 255,
        };

        for i in 0..i32::from(self.count) {
            let offset = spacing * i;
            fill_gradient_ring(leds, middle - width + offset, dark, middle + offset, bright);
            fill_gradient_ring(leds, middle + offset, bright, middle + width + offset, dark);

            if self.leading_dot {
                // Single-pixel "gradients" piggyback on the ring math.
                fill_gradient_ring(
                    leds,
                    middle - width + offset,
                    red,
                    middle - width + offset,
                    red,
                );
                fill_gradient_ring(
                    leds,
                    middle + width + offset,
                    red,
                    middle + width + offset,
                    red,
                );
            }
        }

        advice
    }
}
