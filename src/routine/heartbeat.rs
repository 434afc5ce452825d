//! Whole-ring red pulse following an ECG-like brightness table.
//!
//! The table holds one two-peak heartbeat; it plays once every two
//! beats, so the lub-dub lands on alternating taps.

use embassy_time::Duration;

use super::{FrameCtx, Routine, TickAdvice};
use crate::color::Rgb;
use crate::math8::lerp8by8;
use crate::ring::fill_solid;

const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

#[rustfmt::skip]
const HEARTBEAT_TABLE: [u8; 64] = [
     25,  61, 105, 153, 197, 233, 253, 255,
    252, 243, 230, 213, 194, 149, 101, 105,
    153, 197, 216, 233, 244, 253, 255, 255,
    252, 249, 243, 237, 230, 223, 213, 206,
    194, 184, 174, 162, 149, 138, 126, 112,
    101,  91,  78,  69,  62,  58,  51,  47,
     43,  39,  37,  35,  29,  25,  22,  20,
     19,  15,  12,   9,   8,   6,   5,   3,
];

#[derive(Debug, Clone, Default)]
pub struct HeartbeatRoutine;

impl HeartbeatRoutine {
    pub const fn new() -> Self {
        Self
    }
}

impl Routine for HeartbeatRoutine {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &FrameCtx<'_>, leds: &mut [Rgb]) -> TickAdvice {
        fill_solid(leds, RED);

        let steps = HEARTBEAT_TABLE.len() as u8;
        let index = lerp8by8(0, steps, ctx.tempo.beat8_div(2));
        let brightness = HEARTBEAT_TABLE[usize::from(index).min(HEARTBEAT_TABLE.len() - 1)];

        TickAdvice {
            next_interval: Duration::from_millis(5),
            brightness,
        }
    }
}
