//! Heat-diffusion fire, burning from the center out to both ends.
//!
//! Classic 1-D cellular automaton: every cell cools a little, heat
//! drifts away from the ignition zone by neighbor averaging, and sparks
//! randomly ignite near cell zero. Cell zero sits at the ring's center
//! and the heat field is mirrored onto both physical halves.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::MAX_PIXELS;
use crate::color::{Rgb, heat_color};
use crate::math8::{Rng8, qadd8, qsub8};
use crate::ring::fill_solid;

const COOLING: u8 = 55;
const SPARKING: u8 = 120;

/// Sparks ignite within the first few cells of the ignition zone
const SPARK_ZONE: u8 = 7;

#[derive(Debug, Clone)]
pub struct FireRoutine {
    heat: [u8; MAX_PIXELS],
    cooling: u8,
    sparking: u8,
    rng: Rng8,
}

impl FireRoutine {
    pub const fn new() -> Self {
        Self {
            heat: [0; MAX_PIXELS],
            cooling: COOLING,
            sparking: SPARKING,
            rng: Rng8::new(0xf1a3_57e9),
        }
    }

    /// Override the cooling and sparking rates
    #[must_use]
    pub const fn with_tuning(mut self, cooling: u8, sparking: u8) -> Self {
        self.set_tuning(cooling, sparking);
        self
    }

    /// Adjust the cooling and sparking rates of a burning fire
    pub const fn set_tuning(&mut self, cooling: u8, sparking: u8) {
        self.cooling = cooling;
        self.sparking = sparking;
    }
}

impl Default for FireRoutine {
    fn default() -> Self {
        Self::new()
    }
}

impl Routine for FireRoutine {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let n = leds.len();
        let advice = TickAdvice {
            next_interval: Duration::from_millis(10),
            brightness: ctx.max_brightness,
        };
        if n < 2 {
            fill_solid(leds, Rgb { r: 0, g: 0, b: 0 });
            return advice;
        }

        let half = n / 2;
        let cells = n - half; // ceil(n / 2), so the top half maps 1:1

        // Step 1. Cool down every cell a little
        let max_cooling = ((u16::from(self.cooling) * 10) / cells as u16 + 2) as u8;
        for cell in &mut self.heat[..cells] {
            *cell = qsub8(*cell, self.rng.u8_range(0, max_cooling));
        }

        // Step 2. Heat drifts away from the ignition zone and diffuses
        for k in (2..cells).rev() {
            let spread =
                (u16::from(self.heat[k - 1]) + 2 * u16::from(self.heat[k - 2])) / 3;
            self.heat[k] = spread as u8;
        }

        // Step 3. Randomly ignite new sparks near cell zero
        if self.rng.next_u8() < self.sparking {
            let y = usize::from(self.rng.u8_range(0, SPARK_ZONE)).min(cells - 1);
            self.heat[y] = qadd8(self.heat[y], self.rng.u8_range(160, 255));
        }

        // Step 4. Map heat to colors, mirrored around the center:
        // cell 0 lights both center pixels, the hottest zone, with the
        // flames tapering toward both physical ends.
        for i in 0..cells {
            leds[half + i] = heat_color(self.heat[i]);
        }
        for i in 0..half {
            leds[half - 1 - i] = heat_color(self.heat[i]);
        }

        advice
    }

    fn reset(&mut self) {
        self.heat = [0; MAX_PIXELS];
    }
}
