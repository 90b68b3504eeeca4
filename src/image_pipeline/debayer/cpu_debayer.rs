use crate::image_pipeline::common::ImageView;
use crate::image_pipeline::debayer::{BayerPattern, interpolate};
use crate::image_pipeline::pixel::Rgb;

/// Demosaics a full RAW8 Bayer frame into a same-sized RGB888 buffer.
///
/// Only interior pixels are written. The outer 1-pixel ring of `rgb` keeps
/// whatever it held before the call, so callers must not place content of
/// interest on the frame border. With `swap_red_blue` the red and blue
/// output bytes trade places.
///
/// `rgb` must hold at least `raw.width * raw.height * 3` bytes.
pub fn debayer(raw: &ImageView<'_>, rgb: &mut [u8], pattern: BayerPattern, swap_red_blue: bool) {
    let width = raw.width;

    for y in 1..raw.height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;
            let [r, g, b] = interpolate(raw.data, width, idx, pattern.site(y, x));

            let mut px = Rgb::new(r as u8, g as u8, b as u8);
            if swap_red_blue {
                px = px.swap_red_blue();
            }
            rgb[idx * 3..idx * 3 + 3].copy_from_slice(&px.to_array());
        }
    }
}
