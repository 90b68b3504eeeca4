use crate::image_pipeline::common::{ImageView, ImageViewMut};
use crate::image_pipeline::debayer::{BayerPattern, interpolate};
use crate::image_pipeline::pixel::Q8;

/// Crops, scales and demosaics a RAW8 Bayer frame in one pass.
///
/// Each destination pixel maps to a source site through a 16.8 fixed-point
/// walk over `src_dim - 2 - 2 * crop` pixels, offset by the crop origin and
/// clamped into `[1, src_dim - 2]` so the true border is never read. The
/// colour at that site is rebuilt from its neighbours; there is no blending
/// between sites.
///
/// # Panics
///
/// When `dst.width` or `dst.height` is 1 (the scale divides by
/// `dst_dim - 1`). The source must be at least 3x3.
pub fn crop_and_debayer(
    src: &ImageView<'_>,
    crop_x: usize,
    crop_y: usize,
    dst: &mut ImageViewMut<'_>,
    pattern: BayerPattern,
) {
    debug_assert!(
        dst.width >= 2 && dst.height >= 2,
        "crop_and_debayer needs a destination of at least 2x2, got {}x{}",
        dst.width,
        dst.height
    );

    let src_w = src.width as i32;
    let src_h = src.height as i32;
    let (crop_x, crop_y) = (crop_x as i32, crop_y as i32);
    let span_x = src_w - 2 - crop_x * 2;
    let span_y = src_h - 2 - crop_y * 2;
    let den_x = dst.width as i32 - 1;
    let den_y = dst.height as i32 - 1;

    for dy in 0..dst.height {
        let sy = (Q8::ratio(dy as i32 * span_y, den_y).floor() + crop_y)
            .max(1)
            .min(src_h - 2) as usize;

        for dx in 0..dst.width {
            let sx = (Q8::ratio(dx as i32 * span_x, den_x).floor() + crop_x)
                .max(1)
                .min(src_w - 2) as usize;

            let [r, g, b] = interpolate(src.data, src.width, sy * src.width + sx, pattern.site(sy, sx));

            let o = (dy * dst.width + dx) * 3;
            dst.data[o..o + 3].copy_from_slice(&[clamp_u8(r), clamp_u8(g), clamp_u8(b)]);
        }
    }
}

#[inline(always)]
fn clamp_u8(v: u32) -> u8 {
    v.min(255) as u8
}
