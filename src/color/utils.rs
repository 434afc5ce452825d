pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::{blend8, scale8},
};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Blend two HSV colors, taking the shortest way around the hue circle
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend_hsv(a: Hsv, b: Hsv, amount_of_b: u8) -> Hsv {
    let mut delta = (i16::from(b.hue) - i16::from(a.hue)).rem_euclid(256);
    if delta > 128 {
        delta -= 256;
    }
    let step = (delta * i16::from(amount_of_b)) / 255;
    Hsv {
        hue: (i16::from(a.hue) + step).rem_euclid(256) as u8,
        sat: blend8(a.sat, b.sat, amount_of_b),
        val: blend8(a.val, b.val, amount_of_b),
    }
}

/// Saturating per-channel add of two colors
#[inline]
pub fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Scale every channel of a color by an 8-bit factor
#[inline]
pub fn scale_rgb(c: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(c.r, scale),
        g: scale8(c.g, scale),
        b: scale8(c.b, scale),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
