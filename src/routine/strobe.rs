//! Beat-windowed strobes.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::{Hsv, Rgb, hsv2rgb};
use crate::math8::{lerp8by8, map_range, triwave8};
use crate::ring::{fill_solid, fill_solid_ring};

const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Two flashes per beat: a yaw-colored main flash right before the beat
/// boundary and a short white pre-flash at 80% beat progress.
#[derive(Debug, Clone, Default)]
pub struct StrobeRoutine;

impl StrobeRoutine {
    pub const fn new() -> Self {
        Self
    }
}

impl Routine for StrobeRoutine {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let progress = ctx.tempo.beat_progress();

        if progress > 0.95 {
            let hue = ctx.motion.map_or(0, |motion| {
                map_range(i32::from(motion.yaw), 0, 360, 0, 255).clamp(0, 255) as u8
            });
            fill_solid(
                leds,
                hsv2rgb(Hsv {
                    hue,
                    sat: 255,
                    val: 255,
                }),
            );
        } else if progress > 0.80 && progress < 0.85 {
            fill_solid(leds, WHITE);
        } else {
            fill_solid(leds, BLACK);
        }

        TickAdvice {
            next_interval: Duration::from_millis(5),
            brightness: ctx.max_brightness,
        }
    }
}

/// A white window that widens and narrows with a triangle wave while
/// jumping around the ring, re-fired on every quarter beat.
#[derive(Debug, Clone, Default)]
pub struct QuadStrobeRoutine {
    shift: u8,
}

impl QuadStrobeRoutine {
    pub const fn new() -> Self {
        Self { shift: 0 }
    }
}

impl Routine for QuadStrobeRoutine {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let n = leds.len();
        let quarter_beat_us = (60_000_000.0 / (ctx.tempo.bpm() * 4.0)) as u64;
        let advice = TickAdvice {
            next_interval: Duration::from_micros(quarter_beat_us),
            brightness: ctx.max_brightness,
        };
        if n == 0 {
            return advice;
        }

        let triwave = triwave8((ctx.run_counter as u8).wrapping_mul(6));
        let strip_length = lerp8by8(1, 16, triwave);
        let start =
            ((u64::from(ctx.run_counter) * 15 + u64::from(self.shift)) % n as u64) as i32;

        fill_solid(leds, BLACK);
        fill_solid_ring(leds, start, start + i32::from(strip_length), WHITE);

        // Once the window has shrunk back to a point, rotate the
        // whole sequence one step clockwise.
        if strip_length == 1 {
            self.shift = self.shift.wrapping_add(1);
        }

        advice
    }

    fn reset(&mut self) {
        self.shift = 0;
    }
}
