//! Orbiting gradient stripes.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::{Hsv, Rgb};
use crate::math8::{map_range, scale8, sin8};
use crate::ring::{fill_gradient_ring, fill_solid, normalize_index};

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Length of the stripe in pixels; brightest at the midpoint
const STRIPE_LENGTH: i32 = 20;
const STRIPE_MIDPOINT: i32 = STRIPE_LENGTH / 2;

/// Largest per-frame step in reverse (speed-swing) mode
const MAX_LOOP_SPEED: i32 = 5;

/// A hue-cycling stripe orbiting the ring.
///
/// Forward mode pins the stripe position to the beat phase, one lap per
/// beat. Reverse mode instead swings the stripe's *speed* with a slow
/// sine over four beats, so it accelerates, stalls and backs up.
#[derive(Debug, Clone)]
pub struct FastLoopRoutine {
    reverse: bool,
    start: i32,
    hue: u8,
}

impl FastLoopRoutine {
    pub const fn new(reverse: bool) -> Self {
        Self {
            reverse,
            start: 0,
            hue: 0,
        }
    }
}

impl Routine for FastLoopRoutine {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let advice = TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        };
        let n = leds.len();
        if n == 0 {
            return advice;
        }

        if self.reverse {
            let swing = i32::from(sin8(ctx.tempo.beat8_div(4)));
            self.start += map_range(swing, 0, 255, -MAX_LOOP_SPEED, MAX_LOOP_SPEED + 1);
            self.start = normalize_index(self.start, n) as i32;
        } else {
            self.start = i32::from(scale8(n as u8, ctx.tempo.beat8()));
        }

        fill_solid(leds, BLACK);
        let dark = Hsv {
            hue: self.hue,
            sat: 255,
            val: 0,
        };
        let bright = Hsv {
            hue: self.hue,
            sat: 255,
            val: 255,
        };
        fill_gradient_ring(leds, self.start, dark, self.start + STRIPE_MIDPOINT, bright);
        fill_gradient_ring(
            leds,
            self.start + STRIPE_MIDPOINT + 1,
            bright,
            self.start + STRIPE_LENGTH,
            dark,
        );

        self.hue = self.hue.wrapping_add(1);
        advice
    }

    fn reset(&mut self) {
        self.start = 0;
        self.hue = 0;
    }
}

/// Two counter-swinging gradient pulses in opposite ring halves,
/// offset half a hue circle from each other.
#[derive(Debug, Clone, Default)]
pub struct PendulumRoutine;

impl PendulumRoutine {
    pub const fn new() -> Self {
        Self
    }
}

impl Routine for PendulumRoutine {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let advice = TickAdvice {
            // Needs a fast refresh rate to read as continuous motion.
            next_interval: Duration::from_micros(1_500),
            brightness: ctx.max_brightness,
        };
        let n = leds.len();
        if n == 0 {
            return advice;
        }

        let hue = ctx.motion.map_or(0, |motion| {
            map_range(i32::from(motion.yaw), 0, 360, 0, 255).clamp(0, 255) as u8
        });
        let half = (n / 2) as u8;

        let pos1 = i32::from(ctx.tempo.beatsin8(0, half));
        let pos2 = i32::from(ctx.tempo.beatsin8(half, n as u8));

        fill_solid(leds, BLACK);
        for (pos, pulse_hue) in [(pos1, hue), (pos2, hue.wrapping_add(128))] {
            let dark = Hsv {
                hue: pulse_hue,
                sat: 255,
                val: 0,
            };
            let bright = Hsv {
                hue: pulse_hue,
                sat: 255,
                val: 255,
            };
            fill_gradient_ring(leds, pos, dark, pos + 10, bright);
            fill_gradient_ring(leds, pos + 11, bright, pos + 20, dark);
        }

        advice
    }
}
