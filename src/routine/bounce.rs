//! Beat-blended gradients and juggling dots.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::{Hsv, RAINBOW_PALETTE, Rgb, add_colors, blend_hsv, color_from_palette};
use crate::math8::beatsin16;
use crate::ring::{fade_all, fill_gradient_ring};

/// Two colors chasing each other around the ring.
///
/// The endpoints cross-fade between red and deep blue with the beat
/// while the seam slowly rotates, so the whole ring appears to bounce
/// between the two colors.
#[derive(Debug, Clone, Default)]
pub struct BounceBlendRoutine {
    start: u16,
}

const BLEND_A: Hsv = Hsv {
    hue: 0,
    sat: 255,
    val: 255,
};
const BLEND_B: Hsv = Hsv {
    hue: 160,
    sat: 255,
    val: 0,
};

/// Frames between one-pixel rotations of the seam
const ROTATE_EVERY: u32 = 10;

impl BounceBlendRoutine {
    pub const fn new() -> Self {
        Self { start: 1 }
    }
}

impl Routine for BounceBlendRoutine {
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

        let mix = ctx.tempo.beatsin8(0, 255);
        let end_color = blend_hsv(BLEND_A, BLEND_B, mix);
        let mid_color = blend_hsv(BLEND_B, BLEND_A, mix);

        let start = i32::from(self.start);
        let half = (n / 2) as i32;
        fill_gradient_ring(leds, start, end_color, start + half, mid_color);
        fill_gradient_ring(leds, start + half + 1, mid_color, start + n as i32, end_color);

        if ctx.run_counter % ROTATE_EVERY == 0 {
            self.start += 1;
            if usize::from(self.start) + 1 >= n {
                self.start = 0;
            }
        }

        advice
    }

    fn reset(&mut self) {
        self.start = 1;
    }
}

/// Sine-juggled dots with palette trails.
///
/// A once-per-second script varies the dot count, hue spread and trail
/// length over a one-minute cycle; each dot swings on its own slightly
/// detuned sine so they continually overtake each other.
#[derive(Debug, Clone)]
pub struct JuggleRoutine {
    numdots: u8,
    fade: u8,
    hue_diff: u8,
    base_hue: u8,
    last_second: u8,
}

impl JuggleRoutine {
    pub const fn new() -> Self {
        Self {
            numdots: 4,
            fade: 2,
            hue_diff: 16,
            base_hue: 0,
            // Out-of-range so the first frame always applies the script.
            last_second: 99,
        }
    }
}

impl Routine for JuggleRoutine {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let advice = TickAdvice {
            // Fast refresh so no swing position gets skipped.
            next_interval: Duration::from_micros(150),
            brightness: ctx.max_brightness,
        };
        let n = leds.len();
        if n == 0 {
            return advice;
        }

        let second = (ctx.now.as_secs() % 60) as u8;
        if second != self.last_second {
            self.last_second = second;
            // Trail lengths are tuned for 120 BPM; scale with the tempo.
            let fade_factor = ctx.tempo.bpm() / 120.0;
            let scaled = |fade: u8| (f32::from(fade) * fade_factor) as u8;
            match second {
                1 => {
                    self.numdots = 1;
                    self.hue_diff = 8;
                    self.fade = scaled(8);
                    self.base_hue = 0;
                }
                6 => {
                    self.numdots = 2;
                    self.hue_diff = 4;
                    self.fade = scaled(12);
                    self.base_hue = 0;
                }
                25 => {
                    self.numdots = 4;
                    self.hue_diff = 24;
                    self.fade = scaled(50);
                    self.base_hue = 128;
                }
                40 => {
                    self.numdots = 2;
                    self.hue_diff = 16;
                    self.fade = scaled(50);
                    self.base_hue = 0;
                }
                52 => {
                    self.numdots = 4;
                    self.hue_diff = 24;
                    self.fade = scaled(80);
                    self.base_hue = 160;
                }
                _ => {}
            }
        }

        fade_all(leds, 255 - self.fade.max(1));

        let swing_bpm = (ctx.tempo.bpm() / 2.0) as u16;
        let mut hue = self.base_hue;
        for i in 0..u16::from(self.numdots) {
            let detuned = swing_bpm + i + u16::from(self.numdots);
            let pos = usize::from(beatsin16(detuned, 0, (n - 1) as u16, ctx.now));
            leds[pos] = add_colors(leds[pos], color_from_palette(&RAINBOW_PALETTE, hue, 255));
            hue = hue.wrapping_add(self.hue_diff);
        }

        advice
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
