//! Glitter textures: random white sparks over a fading or black canvas.
//!
//! Both variants speed up their refresh as the wearer moves, so shaking
//! the ring visibly densifies the sparkle.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::Rgb;
use crate::math8::{Rng8, map_range};
use crate::ring::{add_glitter, fade_all, fill_solid};

/// Activity level treated as full speed for the refresh mapping
const REFRESH_FULL_ACTIVITY: i32 = 2_500;

/// Refresh interval for motion level, in milliseconds: idle 40, flat out 2
fn motion_refresh(ctx: &FrameCtx<'_>, idle_ms: u64) -> Duration {
    match ctx.motion {
        Some(motion) => {
            let activity = motion.activity_level().clamp(0, REFRESH_FULL_ACTIVITY);
            #[allow(clippy::cast_sign_loss)]
            Duration::from_millis(map_range(activity, 0, REFRESH_FULL_ACTIVITY, 40, 2) as u64)
        }
        None => Duration::from_millis(idle_ms),
    }
}

/// Sparse glitter over continuously fading trails
#[derive(Debug, Clone)]
pub struct FadeGlitterRoutine {
    rng: Rng8,
}

impl FadeGlitterRoutine {
    pub const fn new() -> Self {
        Self {
            rng: Rng8::new(0x9b5c_c1d7),
        }
    }
}

impl Routine for FadeGlitterRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        fade_all(leds, 205);
        add_glitter(leds, &mut self.rng, 70);
        TickAdvice {
            next_interval: motion_refresh(ctx, 20),
            brightness: ctx.max_brightness,
        }
    }
}

/// Dense glitter on a black canvas; density follows activity
#[derive(Debug, Clone)]
pub struct DiscoGlitterRoutine {
    rng: Rng8,
}

/// Activity level at which glitter density maxes out
const DENSITY_FULL_ACTIVITY: i32 = 3_000;

impl DiscoGlitterRoutine {
    pub const fn new() -> Self {
        Self {
            rng: Rng8::new(0x3d6e_a90b),
        }
    }
}

impl Routine for DiscoGlitterRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        fill_solid(leds, Rgb { r: 0, g: 0, b: 0 });

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let chance = ctx.motion.map_or(255, |motion| {
            let activity = motion.activity_level().clamp(0, DENSITY_FULL_ACTIVITY);
            map_range(activity, 0, DENSITY_FULL_ACTIVITY, 100, 255) as u8
        });
        add_glitter(leds, &mut self.rng, chance);

        TickAdvice {
            next_interval: motion_refresh(ctx, 10),
            brightness: ctx.max_brightness,
        }
    }
}
