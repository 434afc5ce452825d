//! Summed sine waves, whole-ring glow, and blade sweeps.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::{
    Hsv, LAVA_PALETTE, OCEAN_PALETTE, PARTY_PALETTE, Palette16, RAINBOW_PALETTE, Rgb,
    color_from_palette, hsv2rgb, nblend_palette,
};
use crate::math8::{beatsin8, sin8};
use crate::ring::{fade_all, fill_solid, normalize_index};

/// Spatial frequencies of the three waves, in hue steps per pixel
const WAVE_FREQ: [i32; 3] = [7, 6, 5];

/// Channels stepped per frame while cross-fading the live palette
const MAX_PALETTE_CHANGES: u8 = 24;

/// Palettes the effect cross-fades through, 15 seconds each
const PALETTE_BANK: [&Palette16; 4] = [
    &PARTY_PALETTE,
    &RAINBOW_PALETTE,
    &OCEAN_PALETTE,
    &LAVA_PALETTE,
];

/// Three drifting sine waves summed per pixel and mapped through a
/// palette that slowly cross-fades through a bank.
#[derive(Debug, Clone)]
pub struct ThreeSinRoutine {
    waves: [i32; 3],
    current_palette: Palette16,
    target: usize,
    last_second: u8,
}

impl ThreeSinRoutine {
    pub const fn new() -> Self {
        Self {
            waves: [0; 3],
            current_palette: [Rgb { r: 0, g: 0, b: 0 }; 16],
            target: 0,
            last_second: 99,
        }
    }
}

impl Routine for ThreeSinRoutine {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        // Render on alternate frames; the off frames just advance time.
        if ctx.run_counter % 2 == 0 {
            nblend_palette(
                &mut self.current_palette,
                PALETTE_BANK[self.target],
                MAX_PALETTE_CHANGES,
            );

            self.waves[0] += i32::from(beatsin8(10, 0, 8, ctx.now)) - 4;
            self.waves[1] += i32::from(beatsin8(15, 0, 4, ctx.now)) - 2;
            self.waves[2] += i32::from(beatsin8(12, 0, 6, ctx.now)) - 3;

            for (k, led) in leds.iter_mut().enumerate() {
                let mut sum = 0u8;
                for (freq, wave) in WAVE_FREQ.iter().zip(self.waves.iter()) {
                    let theta = ((freq * k as i32 + wave).rem_euclid(256)) as u8;
                    sum = sum.wrapping_add(sin8(theta));
                }
                *led = color_from_palette(&self.current_palette, sum, 255);
            }
        }

        let second = (ctx.now.as_secs() % 60) as u8;
        if second != self.last_second {
            self.last_second = second;
            if second % 15 == 0 {
                self.target = (self.target + 1) % PALETTE_BANK.len();
            }
        }

        TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Whole-ring glow that breathes through the rainbow, stepping to the
/// next color while the ring is dark.
#[derive(Debug, Clone, Default)]
pub struct ColorGlowRoutine {
    palette_index: u8,
    index_updated: bool,
}

impl ColorGlowRoutine {
    pub const fn new() -> Self {
        Self {
            palette_index: 0,
            index_updated: false,
        }
    }
}

impl Routine for ColorGlowRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let brightness = beatsin8(30, 0, 255, ctx.now);

        // Step the color exactly once per dark trough.
        if brightness < 5 && !self.index_updated {
            self.palette_index = self.palette_index.wrapping_add(32);
            self.index_updated = true;
        }
        if brightness > 5 && self.index_updated {
            self.index_updated = false;
        }

        fill_solid(
            leds,
            color_from_palette(&RAINBOW_PALETTE, self.palette_index, brightness),
        );

        TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        }
    }

    fn reset(&mut self) {
        self.palette_index = 0;
        self.index_updated = false;
    }
}

/// Pixels per fan blade on the mapped ring
const BLADE_LENGTH: usize = 6;

/// A lit index sweeping up and down every blade of a ring-mapped fan,
/// with trails fading behind it.
#[derive(Debug, Clone, Default)]
pub struct FanWipeRoutine;

impl FanWipeRoutine {
    pub const fn new() -> Self {
        Self
    }
}

impl Routine for FanWipeRoutine {
    #[allow(clippy::cast_possible_wrap)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let advice = TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        };
        let n = leds.len();
        if n == 0 {
            return advice;
        }

        let hue = beatsin8(1, 0, 255, ctx.now);
        let vertical = beatsin8(45, 0, (BLADE_LENGTH - 1) as u8, ctx.now);

        fade_all(leds, 230);

        let blades = (n / BLADE_LENGTH).max(1);
        for blade in 0..blades {
            let i = normalize_index((blade * BLADE_LENGTH) as i32 + i32::from(vertical), n);
            leds[i] = hsv2rgb(Hsv {
                hue,
                sat: 255,
                val: 255,
            });
        }

        advice
    }
}
