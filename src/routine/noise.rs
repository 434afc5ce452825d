//! A 1-D slice of a drifting 3-D noise field, mapped through a palette.
//!
//! The slice advances along all three axes each frame at a speed that
//! breathes with the beat. At low speeds successive frames are blended
//! together, which suppresses the stepping artifacts coarse noise shows
//! when it barely moves.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::MAX_PIXELS;
use crate::color::{Palette16, Rgb, color_from_palette};
use crate::math8::{Rng8, noise3, qadd8, qsub8, scale8};

/// Noise-space distance between neighboring pixels. Higher is more
/// zoomed out; 1 would be near-solid colors.
const NOISE_SCALE: u16 = 30;

/// Fastest advance of the noise field, in noise units per frame
const MAX_SPEED: u8 = 25;

#[derive(Debug, Clone)]
pub struct NoiseRoutine {
    palette: &'static Palette16,
    smoothed: [u8; MAX_PIXELS],
    x: u16,
    y: u16,
    z: u16,
    hue_drift: u8,
}

impl NoiseRoutine {
    pub fn new(palette: &'static Palette16) -> Self {
        // Start somewhere random in the field so reselecting the routine
        // doesn't replay the identical flames.
        let mut rng = Rng8::new(0x6e01_5eed);
        Self {
            palette,
            smoothed: [0; MAX_PIXELS],
            x: rng.u16_below(u16::MAX),
            y: rng.u16_below(u16::MAX),
            z: rng.u16_below(u16::MAX),
            hue_drift: 0,
        }
    }
}

impl Routine for NoiseRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let n = leds.len().min(MAX_PIXELS);

        let speed = if ctx.tempo.bpm() > 50.0 {
            ctx.tempo.beatsin8(1, MAX_SPEED)
        } else {
            1
        };

        // The slower the field moves, the harder we smooth.
        let data_smoothing = if speed < 50 { 200 - speed * 4 } else { 0 };

        for i in 0..n {
            #[allow(clippy::cast_possible_truncation)]
            let offset = NOISE_SCALE.wrapping_mul(i as u16);
            let mut data = noise3(self.x.wrapping_add(offset), self.y, self.z);

            // Stretch the mid-heavy noise distribution toward full range.
            data = qsub8(data, 16);
            data = qadd8(data, scale8(data, 39));

            if data_smoothing > 0 {
                let old = self.smoothed[i];
                data = scale8(old, data_smoothing)
                    .saturating_add(scale8(data, 255 - data_smoothing));
            }
            self.smoothed[i] = data;
        }

        self.z = self.z.wrapping_add(u16::from(speed));
        // Slow sideways drift for visual variation.
        self.x = self.x.wrapping_add(u16::from(speed / 8));
        self.y = self.y.wrapping_sub(u16::from(speed / 16));

        for i in 0..n {
            let index = self.smoothed[i].wrapping_add(self.hue_drift);
            let raw_bri = self.smoothed[n - 1 - i];

            // The palette carries the light/dark range; push brightness
            // toward full except in the deepest wells.
            let bri = if raw_bri > 127 {
                255
            } else {
                let doubled = raw_bri << 1;
                scale8(doubled, doubled)
            };

            leds[i] = color_from_palette(self.palette, index, bri);
        }
        self.hue_drift = self.hue_drift.wrapping_add(1);

        TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        }
    }

    fn reset(&mut self) {
        self.smoothed = [0; MAX_PIXELS];
        self.hue_drift = 0;
    }
}
