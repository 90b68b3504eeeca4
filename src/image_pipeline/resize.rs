//! Bilinear resize with on-the-fly pixel format conversion
//!
//! Interpolation always happens on unpacked 8-bit RGB, so one pass can both
//! rescale and change format (an RGB565 camera frame straight into an RGB888
//! model input, for example).

use crate::image_pipeline::common::{ImageView, ImageViewMut};
use crate::image_pipeline::pixel::{PixelFormat, Q16, Rgb};

/// Resizes `src` into `dst`, converting from `src_format` to `dst_format`.
///
/// Source coordinates advance by `(src_dim - 1) / (dst_dim - 1)` in 16.16
/// fixed point. Every weighted sum is shifted right by 16 without rounding,
/// so each of the two blend stages may lose up to one LSB. Grayscale output
/// is the truncated integer luma of the blended colour.
///
/// # Panics
///
/// When `dst.width` or `dst.height` is 1. Both must be at least 2.
pub fn resize(
    src: &ImageView<'_>,
    src_format: PixelFormat,
    dst: &mut ImageViewMut<'_>,
    dst_format: PixelFormat,
) {
    debug_assert!(
        dst.width >= 2 && dst.height >= 2,
        "resize needs a destination of at least 2x2, got {}x{}",
        dst.width,
        dst.height
    );

    let src_bpp = src_format.bytes_per_pixel();
    let dst_bpp = dst_format.bytes_per_pixel();

    let x_ratio = Q16::ratio(src.width as i32 - 1, dst.width as i32 - 1);
    let y_ratio = Q16::ratio(src.height as i32 - 1, dst.height as i32 - 1);
    let last_x = src.width - 1;
    let last_y = src.height - 1;

    let texel = |x: usize, y: usize| src_format.unpack(&src.data[(y * src.width + x) * src_bpp..]);

    for y in 0..dst.height {
        let fy = y_ratio.mul_int(y as i32);
        let y0 = fy.floor() as usize;
        let y1 = if y0 < last_y { y0 + 1 } else { y0 };

        for x in 0..dst.width {
            let fx = x_ratio.mul_int(x as i32);
            let x0 = fx.floor() as usize;
            let x1 = if x0 < last_x { x0 + 1 } else { x0 };

            let p00 = texel(x0, y0);
            let p01 = texel(x1, y0);
            let p10 = texel(x0, y1);
            let p11 = texel(x1, y1);

            // along x on both rows, then along y
            let blend = |c00: u8, c01: u8, c10: u8, c11: u8| {
                let top = fx.lerp(c00 as i32, c01 as i32);
                let bottom = fx.lerp(c10 as i32, c11 as i32);
                fy.lerp(top, bottom) as u8
            };
            let rgb = Rgb::new(
                blend(p00.r, p01.r, p10.r, p11.r),
                blend(p00.g, p01.g, p10.g, p11.g),
                blend(p00.b, p01.b, p10.b, p11.b),
            );

            dst_format.pack(rgb, &mut dst.data[(y * dst.width + x) * dst_bpp..]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgb888(width: usize, height: usize) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| {
                let (x, y) = (i % width, i / width);
                [(x * 20) as u8, (y * 30) as u8, ((x + y) * 7) as u8]
            })
            .collect()
    }

    #[test]
    fn test_same_size_rgb888_is_identity() {
        for (width, height) in [(2, 2), (5, 3), (9, 11)] {
            let src = gradient_rgb888(width, height);
            let mut out = vec![0u8; src.len()];
            resize(
                &ImageView::new(&src, width, height),
                PixelFormat::Rgb888,
                &mut ImageViewMut::new(&mut out, width, height),
                PixelFormat::Rgb888,
            );
            assert_eq!(out, src, "{width}x{height}");
        }
    }

    #[test]
    fn test_upscale_midpoint_blend() {
        // 2x1 grayscale -> 3x2: the middle column lands halfway between 0 and 200
        let src = [0u8, 200];
        let mut out = vec![0u8; 6];
        resize(
            &ImageView::new(&src, 2, 1),
            PixelFormat::Grayscale,
            &mut ImageViewMut::new(&mut out, 3, 2),
            PixelFormat::Grayscale,
        );
        assert_eq!(out, vec![0, 100, 200, 0, 100, 200]);
    }

    #[test]
    fn test_downscale_keeps_corners() {
        let (width, height) = (9, 7);
        let src = gradient_rgb888(width, height);
        let mut out = vec![0u8; 3 * 3 * 3];
        resize(
            &ImageView::new(&src, width, height),
            PixelFormat::Rgb888,
            &mut ImageViewMut::new(&mut out, 3, 3),
            PixelFormat::Rgb888,
        );
        let corner = |x: usize, y: usize, w: usize, buf: &[u8]| {
            let o = (y * w + x) * 3;
            [buf[o], buf[o + 1], buf[o + 2]]
        };
        assert_eq!(corner(0, 0, 3, &out), corner(0, 0, width, &src));
        assert_eq!(corner(2, 2, 3, &out), corner(8, 6, width, &src));
        // (4, 3) is exactly the source centre
        assert_eq!(corner(1, 1, 3, &out), corner(4, 3, width, &src));
    }

    #[test]
    fn test_rgb565_to_rgb888_uses_shift_expansion() {
        let src: Vec<u8> = [0xFFFFu16; 4].iter().flat_map(|px| px.to_le_bytes()).collect();
        let mut out = vec![0u8; 12];
        resize(
            &ImageView::new(&src, 2, 2),
            PixelFormat::Rgb565,
            &mut ImageViewMut::new(&mut out, 2, 2),
            PixelFormat::Rgb888,
        );
        assert_eq!(out, [0xF8, 0xFC, 0xF8].repeat(4));
    }

    #[test]
    fn test_rgb888_to_grayscale_and_rgb565() {
        let src = [255u8, 0, 0].repeat(4);
        let mut gray = vec![0u8; 4];
        resize(
            &ImageView::new(&src, 2, 2),
            PixelFormat::Rgb888,
            &mut ImageViewMut::new(&mut gray, 2, 2),
            PixelFormat::Grayscale,
        );
        assert_eq!(gray, vec![76; 4]);

        let mut packed = vec![0u8; 8];
        resize(
            &ImageView::new(&src, 2, 2),
            PixelFormat::Rgb888,
            &mut ImageViewMut::new(&mut packed, 2, 2),
            PixelFormat::Rgb565,
        );
        assert_eq!(packed, [0x00, 0xF8].repeat(4));
    }

    #[test]
    #[should_panic]
    fn test_single_pixel_destination_is_rejected() {
        let src = [1u8; 4];
        let mut out = [0u8; 2];
        resize(
            &ImageView::new(&src, 2, 2),
            PixelFormat::Grayscale,
            &mut ImageViewMut::new(&mut out, 1, 2),
            PixelFormat::Grayscale,
        );
    }
}
