//! Wraparound index math and fill primitives for a circular pixel buffer.
//!
//! Routine math routinely produces negative or over-range positions while
//! simulating circular motion; everything here accepts raw `i32` arc
//! endpoints and maps them onto the ring.

use crate::color::{
    GradientDirection, Hsv, Rgb, add_colors, blend_hsv, fill_gradient_hsv, scale_rgb,
};
use crate::math8::Rng8;

/// Marker painted when a caller hands an arc with start after end.
///
/// A solid red ring is impossible to miss on hardware, which beats
/// silently rendering nothing.
const ARC_ERROR_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };

const GLITTER_TRIALS: u8 = 5;

const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Euclidean modulo: maps any index onto `[0, n)`.
///
/// `normalize_index(-1, 60) == 59`, `normalize_index(125, 60) == 5`.
#[inline]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn normalize_index(i: i32, n: usize) -> usize {
    let n = n as i32;
    (((i % n) + n) % n) as usize
}

/// Fill the whole buffer with one color
pub fn fill_solid(leds: &mut [Rgb], color: Rgb) {
    for led in leds.iter_mut() {
        *led = color;
    }
}

/// Scale every pixel toward black, keeping `keep`/255 of its value
pub fn fade_all(leds: &mut [Rgb], keep: u8) {
    for led in leds.iter_mut() {
        *led = scale_rgb(*led, keep);
    }
}

/// Additively brighten every pixel by `amount`/255 of its own value
pub fn brighten_all(leds: &mut [Rgb], amount: u8) {
    for led in leds.iter_mut() {
        *led = add_colors(*led, scale_rgb(*led, amount));
    }
}

/// Sprinkle white glitter: five trials, each lighting one random pixel
/// with probability `chance`/255
pub fn add_glitter(leds: &mut [Rgb], rng: &mut Rng8, chance: u8) {
    if leds.is_empty() {
        return;
    }
    #[allow(clippy::cast_possible_truncation)]
    let len = leds.len() as u16;
    for _ in 0..GLITTER_TRIALS {
        if rng.next_u8() < chance {
            let i = rng.u16_below(len) as usize;
            leds[i] = add_colors(leds[i], WHITE);
        }
    }
}

/// Paint a gradient along the arc from `start` to `end` (inclusive).
///
/// Endpoints are raw and may be negative or beyond the ring length; the
/// arc is normalized onto the ring. When the arc crosses index 0 it is
/// split into two sub-fills joined by the blend of both endpoint colors
/// at the wrap ratio, so the hue walk stays continuous across the seam.
///
/// `start > end` is a caller bug and paints the error marker. A span of
/// a full revolution or more paints the whole ring once.
pub fn fill_gradient_ring(
    leds: &mut [Rgb],
    start: i32,
    start_color: Hsv,
    end: i32,
    end_color: Hsv,
) {
    let n = leds.len();
    if n == 0 {
        return;
    }
    if start > end {
        fill_solid(leds, ARC_ERROR_COLOR);
        return;
    }

    let span = end - start;
    #[allow(clippy::cast_possible_wrap)]
    if span >= n as i32 {
        fill_gradient_hsv(leds, 0, start_color, n - 1, end_color, GradientDirection::Shortest);
        return;
    }

    let a_start = normalize_index(start, n);
    let a_end = normalize_index(end, n);

    if a_start > a_end {
        // The arc crosses index 0. Split it there; the color at the seam
        // is the endpoint blend at the wrap ratio so both sub-fills meet.
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let ratio = (255 - (a_end as i32 * 255) / span.max(1)).clamp(0, 255) as u8;
        let wrap_color = blend_hsv(start_color, end_color, ratio);

        fill_gradient_hsv(
            leds,
            a_start,
            start_color,
            n - 1,
            wrap_color,
            GradientDirection::Shortest,
        );
        fill_gradient_hsv(leds, 0, wrap_color, a_end, end_color, GradientDirection::Shortest);
    } else {
        fill_gradient_hsv(
            leds,
            a_start,
            start_color,
            a_end,
            end_color,
            GradientDirection::Shortest,
        );
    }
}

/// Paint a solid arc over `[start, end)` with the same normalization,
/// wrap-splitting and error-marker policy as [`fill_gradient_ring`].
///
/// The end index is exclusive, so `end - start` pixels light up and a
/// zero-width arc paints nothing.
pub fn fill_solid_ring(leds: &mut [Rgb], start: i32, end: i32, color: Rgb) {
    let n = leds.len();
    if n == 0 {
        return;
    }
    if start > end {
        fill_solid(leds, ARC_ERROR_COLOR);
        return;
    }

    let span = end - start;
    #[allow(clippy::cast_possible_wrap)]
    if span >= n as i32 {
        fill_solid(leds, color);
        return;
    }
    if span == 0 {
        return;
    }

    let a_start = normalize_index(start, n);
    let a_end = normalize_index(end, n);

    if a_start > a_end {
        for led in &mut leds[a_start..] {
            *led = color;
        }
        for led in &mut leds[..a_end] {
            *led = color;
        }
    } else {
        for led in &mut leds[a_start..a_end] {
            *led = color;
        }
    }
}
