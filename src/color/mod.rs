mod gradient;
mod palette;
mod utils;

pub use gradient::{GradientDirection, fill_gradient_hsv};
pub use palette::{
    HEAT_PALETTE, LAVA_PALETTE, OCEAN_PALETTE, PARTY_PALETTE, Palette16, RAINBOW_PALETTE,
    RAINBOW_STRIPE_PALETTE, color_from_palette, heat_color, nblend_palette,
};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{add_colors, blend_colors, blend_hsv, hsv2rgb, rgb_from_u32, scale_rgb};

pub type Rgb = RGB8;
pub type Hsv = HSV;
