//! Palette flow: a rotating window over a fixed palette.
//!
//! The color start index walks the palette each frame, tilt flips the
//! walk direction, vertical acceleration dims the ring, and glitter
//! density rises when the scheduler is running fast. The re-fire
//! interval itself swings with the beat, which is what makes the flow
//! surge in time with the music.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::{Palette16, Rgb, color_from_palette};
use crate::math8::{Rng8, map_range};
use crate::ring::add_glitter;

/// Palette sample spacing between neighboring pixels.
/// 1 reads like a gradient, 10 like stripes.
const STEPS: u8 = 3;

/// Vertical acceleration that maps to the dimmest output
const MAX_POS_ACCEL: i32 = 3_000;

/// Interval below which the flow counts as "fast" and earns extra glitter
const FAST_INTERVAL: Duration = Duration::from_micros(5_000);

#[derive(Debug, Clone)]
pub struct PaletteFlowRoutine {
    palette: &'static Palette16,
    start_index: u8,
    flow_dir: i8,
    rng: Rng8,
}

impl PaletteFlowRoutine {
    pub const fn new(palette: &'static Palette16) -> Self {
        Self {
            palette,
            start_index: 15,
            flow_dir: 1,
            rng: Rng8::new(0x70a1_e77e),
        }
    }
}

impl Routine for PaletteFlowRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        // Flow follows gravity: flip direction with the ring's tilt.
        if let Some(motion) = ctx.motion {
            if motion.tilt_up() {
                self.flow_dir = -1;
            } else if motion.tilt_down() {
                self.flow_dir = 1;
            }
        }
        self.start_index = self.start_index.wrapping_add_signed(self.flow_dir);

        let mut color_index = self.start_index;
        for led in leds.iter_mut() {
            *led = color_from_palette(self.palette, color_index, 255);
            color_index = color_index.wrapping_add(STEPS);
        }

        let chance = if ctx.interval < FAST_INTERVAL { 250 } else { 25 };
        add_glitter(leds, &mut self.rng, chance);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let brightness = ctx.motion.map_or(ctx.max_brightness, |motion| {
            let accel_z = motion.accel[2].clamp(0, MAX_POS_ACCEL);
            map_range(
                accel_z,
                0,
                MAX_POS_ACCEL,
                i32::from(ctx.max_brightness),
                10,
            )
            .clamp(0, 255) as u8
        });

        TickAdvice {
            next_interval: Duration::from_micros(u64::from(ctx.tempo.beatsin16(1_500, 50_000))),
            brightness,
        }
    }

    fn reset(&mut self) {
        self.start_index = 15;
        self.flow_dir = 1;
    }
}
