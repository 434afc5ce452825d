//! Four racers chasing each other around the ring.
//!
//! Each racer advances on its own modulus of the run counter, so they
//! move at different speeds; every forty frames the speeds reshuffle and
//! the field order changes.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::Rgb;
use crate::math8::Rng8;
use crate::ring::fill_solid;

const NUM_RACERS: usize = 4;

const RACER_COLORS: [Rgb; NUM_RACERS] = [
    Rgb { r: 255, g: 0, b: 0 },
    Rgb { r: 0, g: 0, b: 255 },
    Rgb {
        r: 255,
        g: 255,
        b: 255,
    },
    Rgb {
        r: 255,
        g: 165,
        b: 0,
    },
];

/// Frames between speed reshuffles
const RESHUFFLE_EVERY: u32 = 40;

#[derive(Debug, Clone)]
pub struct RacersRoutine {
    positions: [u16; NUM_RACERS],
    speeds: [u8; NUM_RACERS],
    rng: Rng8,
}

impl RacersRoutine {
    pub fn new() -> Self {
        let mut rng = Rng8::new(0x52ac_e501);
        let speeds = [
            rng.u8_range(1, 4),
            rng.u8_range(1, 4),
            rng.u8_range(1, 4),
            rng.u8_range(1, 4),
        ];
        Self {
            positions: [0, 1, 2, 3],
            speeds,
            rng,
        }
    }
}

impl Default for RacersRoutine {
    fn default() -> Self {
        Self::new()
    }
}

impl Routine for RacersRoutine {
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        let n = leds.len();
        fill_solid(leds, Rgb { r: 0, g: 0, b: 0 });

        if n > 0 {
            for i in 0..NUM_RACERS {
                leds[usize::from(self.positions[i]) % n] = RACER_COLORS[i];

                // A racer steps only on frames divisible by its speed.
                if ctx.run_counter % u32::from(self.speeds[i]) == 0 {
                    #[allow(clippy::cast_possible_truncation)]
                    let next = (usize::from(self.positions[i]) + 1) % n;
                    self.positions[i] = next as u16;
                }

                if ctx.run_counter % RESHUFFLE_EVERY == 0 {
                    self.speeds[i] = self.rng.u8_range(2, 6);
                }
            }
        }

        TickAdvice {
            next_interval: Duration::from_millis(8),
            brightness: ctx.max_brightness,
        }
    }

    fn reset(&mut self) {
        self.positions = [0, 1, 2, 3];
    }
}
