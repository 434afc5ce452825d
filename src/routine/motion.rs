//! Orientation-reactive routines.
//!
//! These four need live motion data to mean anything; the engine keeps
//! them out of the rotation when no sensor is configured, and each still
//! renders a harmless static frame if it ends up selected without one.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::{Hsv, Rgb, hsv2rgb};
use crate::math8::map_range;
use crate::orientation::{LowestPointTracker, OrientationState};
use crate::ring::{fade_all, fill_gradient_ring, fill_solid};

/// Yaw angle (0..360) mapped onto the hue circle
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn yaw_hue(motion: &OrientationState) -> u8 {
    map_range(i32::from(motion.yaw), 0, 360, 0, 255).clamp(0, 255) as u8
}

const WAVE_MAX_ACCEL: i32 = 5_000;
const WAVE_MIN_BRIGHT: i32 = 20;

/// Whole-ring color from yaw, brightness from vertical acceleration
#[derive(Debug, Clone, Default)]
pub struct WaveRoutine;

impl WaveRoutine {
    pub const fn new() -> Self {
        Self
    }
}

impl Routine for WaveRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let (hue, val) = match ctx.motion {
            Some(motion) => {
                let accel_z = motion.accel[2].clamp(-WAVE_MAX_ACCEL, WAVE_MAX_ACCEL);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let val = map_range(
                    accel_z,
                    -WAVE_MAX_ACCEL,
                    WAVE_MAX_ACCEL,
                    WAVE_MIN_BRIGHT,
                    255,
                )
                .clamp(0, 255) as u8;
                (yaw_hue(motion), val)
            }
            None => (0, 128),
        };

        fill_solid(
            leds,
            hsv2rgb(Hsv {
                hue,
                sat: 255,
                val,
            }),
        );

        TickAdvice {
            next_interval: Duration::from_millis(15),
            brightness: ctx.max_brightness,
        }
    }
}

/// Activity needed before the shake register injects a lit pixel
const SHAKE_SENSITIVITY: i32 = 3_000;

/// Shift register fed from whichever end is tilted up.
///
/// Shaking injects yaw-colored pixels at the feed end; stillness injects
/// black, so the pattern runs off the far end and the ring goes dark.
#[derive(Debug, Clone, Default)]
pub struct ShakeItRoutine;

impl ShakeItRoutine {
    pub const fn new() -> Self {
        Self
    }
}

impl Routine for ShakeItRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let advice = TickAdvice {
            next_interval: Duration::from_millis(8),
            brightness: ctx.max_brightness,
        };
        let n = leds.len();
        let Some(motion) = ctx.motion else {
            fade_all(leds, 230);
            return advice;
        };
        if n < 2 {
            return advice;
        }

        let feed = if motion.tilt_down() { n - 1 } else { 0 };

        leds[feed] = if motion.activity_level() > SHAKE_SENSITIVITY {
            hsv2rgb(Hsv {
                hue: yaw_hue(motion),
                sat: 255,
                val: 255,
            })
        } else {
            Rgb { r: 0, g: 0, b: 0 }
        };

        if motion.tilt_up() {
            for i in (0..n - 1).rev() {
                leds[i + 1] = leds[i];
            }
        } else if motion.tilt_down() {
            for i in 0..n - 1 {
                leds[i] = leds[i + 1];
            }
        }

        advice
    }
}

/// Activity needed to trigger a flash
const STROBE_SENSITIVITY: i32 = 3_500;

/// Flash on movement, decay to black at rest
#[derive(Debug, Clone, Default)]
pub struct MotionStrobeRoutine;

impl MotionStrobeRoutine {
    pub const fn new() -> Self {
        Self
    }
}

impl Routine for MotionStrobeRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        match ctx.motion {
            Some(motion) if motion.activity_level() > STROBE_SENSITIVITY => {
                fill_solid(
                    leds,
                    hsv2rgb(Hsv {
                        hue: yaw_hue(motion),
                        sat: 255,
                        val: ctx.max_brightness,
                    }),
                );
            }
            _ => fade_all(leds, 120),
        }

        TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        }
    }
}

/// Half-width of the gravity pulse, in pixels
const GLED_WIDTH: i32 = 3;

/// A hue-cycling gradient pulse pinned to the ring's lowest point.
///
/// The lowest-point tracker glides toward the target and asks for a
/// faster refresh while the device is swinging, so the pulse keeps pace.
#[derive(Debug, Clone)]
pub struct GravityLedRoutine {
    tracker: LowestPointTracker,
    hue: u8,
}

impl GravityLedRoutine {
    pub const fn new() -> Self {
        Self {
            tracker: LowestPointTracker::new(),
            hue: 0,
        }
    }
}

impl Routine for GravityLedRoutine {
    #[allow(clippy::cast_possible_wrap)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let Some(motion) = ctx.motion else {
            fill_solid(leds, Rgb { r: 0, g: 0, b: 0 });
            return TickAdvice {
                next_interval: Duration::from_millis(25),
                brightness: ctx.max_brightness,
            };
        };

        let lowest = self.tracker.step(motion, leds.len());
        let pos = lowest.index as i32;

        // Old pulse positions decay instead of lingering.
        fade_all(leds, 55);

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
        fill_gradient_ring(leds, pos, dark, pos + GLED_WIDTH, bright);
        fill_gradient_ring(
            leds,
            pos + GLED_WIDTH + 1,
            bright,
            pos + 2 * GLED_WIDTH,
            dark,
        );

        self.hue = self.hue.wrapping_add(1);

        TickAdvice {
            next_interval: lowest.refresh_interval,
            brightness: ctx.max_brightness,
        }
    }

    fn reset(&mut self) {
        self.hue = 0;
    }
}

impl Default for GravityLedRoutine {
    fn default() -> Self {
        Self::new()
    }
}
