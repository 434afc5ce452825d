//! Integer math kernel for pixel and phase computations.
//!
//! Everything here is fixed-point or 8-bit saturating arithmetic; the
//! render paths never touch floats.

use embassy_time::Instant;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Saturating 8-bit add
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Saturating 8-bit subtract
#[inline]
pub const fn qsub8(a: u8, b: u8) -> u8 {
    a.saturating_sub(b)
}

/// Linear interpolation between two 8-bit values by an 8-bit fraction
#[inline]
pub const fn lerp8by8(a: u8, b: u8, frac: u8) -> u8 {
    if b > a {
        a + scale8(b - a, frac)
    } else {
        a - scale8(a - b, frac)
    }
}

/// Triangle wave: 0 at input 0, peak 254 at input 128, back to 0
#[inline]
pub const fn triwave8(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    j << 1
}

/// Ease in out quadratic
pub const fn ease_in_out_quad(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    let jj = scale8(j, j);
    let jj2 = jj << 1;
    if i & 0x80 == 0 { jj2 } else { 255 - jj2 }
}

/// Sine approximation: eased triangle wave, 128 at input 0, peak at 64
#[inline]
pub const fn sin8(theta: u8) -> u8 {
    ease_in_out_quad(triwave8(theta.wrapping_add(64)))
}

/// Linearly remap `x` from one integer range onto another
///
/// No clamping is applied; constrain the input first when the source
/// range is a bound.
#[inline]
pub const fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Free-running 16-bit beat counter at a fixed rate, derived from wall
/// clock. One full 0-65535 cycle per beat.
///
/// This is for oscillators whose rate is a constant (hue drifts, fan
/// sweeps); tempo-locked motion goes through
/// [`TempoTracker`](crate::tempo::TempoTracker) instead so it survives
/// BPM changes without a phase jump.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn beat16(bpm: u16, now: Instant) -> u16 {
    ((now
        .as_millis()
        .wrapping_mul(u64::from(bpm))
        .wrapping_mul(65_536))
        / 60_000) as u16
}

/// Free-running 8-bit beat counter at a fixed rate
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn beat8(bpm: u16, now: Instant) -> u8 {
    (beat16(bpm, now) >> 8) as u8
}

/// Free-running sine oscillator between `min` and `max` at a fixed rate
#[inline]
pub fn beatsin8(bpm: u16, min: u8, max: u8, now: Instant) -> u8 {
    min + scale8(sin8(beat8(bpm, now)), max - min)
}

/// 16-bit variant of [`beatsin8`]
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn beatsin16(bpm: u16, min: u16, max: u16, now: Instant) -> u16 {
    let s = u32::from(sin8(beat8(bpm, now)));
    min + ((s * u32::from(max - min)) / 255) as u16
}

/// SplitMix64 mixing step, folded down to u32.
///
/// Shared by [`Rng8`] and the [`noise3`] lattice hash.
#[inline]
const fn mix(x: u64) -> u32 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    #[allow(clippy::cast_possible_truncation)]
    {
        (z ^ (z >> 31)) as u32
    }
}

/// Small deterministic PRNG for glitter, sparks and racer speeds.
///
/// Each routine that needs randomness owns its own instance, so frames
/// are reproducible in tests and routines never share hidden state.
#[derive(Debug, Clone)]
pub struct Rng8 {
    state: u64,
}

impl Rng8 {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        mix(self.state)
    }

    /// Next value in 0..=255
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() & 0xFF) as u8
    }

    /// Next value in `lo..hi`
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn u8_range(&mut self, lo: u8, hi: u8) -> u8 {
        if hi <= lo {
            return lo;
        }
        let span = u32::from(hi - lo);
        lo + ((self.next_u32() % span) as u8)
    }

    /// Next value in `0..n`
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn u16_below(&mut self, n: u16) -> u16 {
        if n == 0 {
            return 0;
        }
        (self.next_u32() % u32::from(n)) as u16
    }
}

/// Hash one lattice point of the noise field
#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn lattice(x: u16, y: u16, z: u16) -> u8 {
    let packed = (x as u64) | ((y as u64) << 16) | ((z as u64) << 32);
    (mix(packed) & 0xFF) as u8
}

/// 3-D value noise sampled at an 8.8 fixed-point coordinate.
///
/// Lattice points sit every 256 units on each axis; values between them
/// are eased trilinear blends, so neighboring samples move smoothly.
/// Returns 0-255.
#[allow(clippy::cast_possible_truncation, clippy::many_single_char_names)]
pub fn noise3(x: u16, y: u16, z: u16) -> u8 {
    let cx = x >> 8;
    let cy = y >> 8;
    let cz = z >> 8;

    let fx = ease_in_out_quad((x & 0xFF) as u8);
    let fy = ease_in_out_quad((y & 0xFF) as u8);
    let fz = ease_in_out_quad((z & 0xFF) as u8);

    let cx1 = cx.wrapping_add(1);
    let cy1 = cy.wrapping_add(1);
    let cz1 = cz.wrapping_add(1);

    // Blend the eight cell corners down one axis at a time.
    let x00 = blend8(lattice(cx, cy, cz), lattice(cx1, cy, cz), fx);
    let x01 = blend8(lattice(cx, cy, cz1), lattice(cx1, cy, cz1), fx);
    let x10 = blend8(lattice(cx, cy1, cz), lattice(cx1, cy1, cz), fx);
    let x11 = blend8(lattice(cx, cy1, cz1), lattice(cx1, cy1, cz1), fx);

    let y0 = blend8(x00, x10, fy);
    let y1 = blend8(x01, x11, fy);

    blend8(y0, y1, fz)
}
