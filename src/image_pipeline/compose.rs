//! Frame composition: blitting a processed image into a display frame and
//! overlaying detection boxes.

use crate::image_pipeline::common::{ImageView, ImageViewMut, Rect};
use crate::image_pipeline::pixel::PixelFormat;

/// Copies `src` into `dst` with its top-left corner at (`x_offset`,
/// `y_offset`). Both buffers use `format`. Pixels landing outside `dst` are
/// clipped.
pub fn blit(
    src: &ImageView<'_>,
    dst: &mut ImageViewMut<'_>,
    x_offset: isize,
    y_offset: isize,
    format: PixelFormat,
) {
    let bpp = format.bytes_per_pixel();

    // visible source columns [x_start, x_end)
    let x_start = (-x_offset).max(0) as usize;
    let x_end = (dst.width as isize - x_offset).clamp(0, src.width as isize) as usize;
    if x_start >= x_end {
        return;
    }
    let run = (x_end - x_start) * bpp;

    for y in 0..src.height {
        let dst_y = y as isize + y_offset;
        if dst_y < 0 || dst_y >= dst.height as isize {
            continue;
        }

        let s = (y * src.width + x_start) * bpp;
        let dst_x = (x_start as isize + x_offset) as usize;
        let d = (dst_y as usize * dst.width + dst_x) * bpp;
        dst.data[d..d + run].copy_from_slice(&src.data[s..s + run]);
    }
}

/// Draws a 1-pixel box outline onto an RGB888 image by setting only the
/// green byte to 255.
///
/// The top edge runs from `(x, y)` for `width` pixels and the bottom edge
/// from `(x, y + height)`; the left and right edges run down `height` pixels
/// from `(x, y)` and `(x + width, y)`. No bounds checks are made: `x + width`
/// and `y + height` must both lie inside the image.
pub fn draw_box(image: &mut ImageViewMut<'_>, bbox: Rect) {
    let step = image.width * 3;
    let start = bbox.y * step + bbox.x * 3 + 1;
    let data = &mut *image.data;

    let bottom = start + bbox.height * step;
    for i in 0..bbox.width {
        data[start + i * 3] = 255;
        data[bottom + i * 3] = 255;
    }

    let right = start + bbox.width * 3;
    for j in 0..bbox.height {
        data[start + j * step] = 255;
        data[right + j * step] = 255;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 % 256) as u8).collect()
    }

    #[test]
    fn test_blit_same_size_at_origin_copies_everything() {
        for format in [PixelFormat::Grayscale, PixelFormat::Rgb565, PixelFormat::Rgb888] {
            let src = numbered(format.frame_size(5, 4));
            let mut out = vec![0u8; src.len()];
            blit(
                &ImageView::new(&src, 5, 4),
                &mut ImageViewMut::new(&mut out, 5, 4),
                0,
                0,
                format,
            );
            assert_eq!(out, src, "{format:?}");
        }
    }

    #[test]
    fn test_blit_centered_into_larger_frame() {
        let src = vec![9u8; 2 * 2];
        let mut out = vec![0u8; 4 * 4];
        blit(
            &ImageView::new(&src, 2, 2),
            &mut ImageViewMut::new(&mut out, 4, 4),
            1,
            1,
            PixelFormat::Grayscale,
        );
        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 0,
            0, 9, 9, 0,
            0, 9, 9, 0,
            0, 0, 0, 0,
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn test_blit_clips_on_every_side() {
        let src = numbered(3 * 3 * 3);
        for (x_off, y_off) in [(-1, -1), (2, 2), (-2, 1), (1, -2), (5, 0), (0, -5)] {
            let mut out = vec![0u8; 4 * 4 * 3];
            blit(
                &ImageView::new(&src, 3, 3),
                &mut ImageViewMut::new(&mut out, 4, 4),
                x_off,
                y_off,
                PixelFormat::Rgb888,
            );

            for dy in 0..4isize {
                for dx in 0..4isize {
                    let (sx, sy) = (dx - x_off, dy - y_off);
                    let d = ((dy * 4 + dx) * 3) as usize;
                    if (0..3).contains(&sx) && (0..3).contains(&sy) {
                        let s = ((sy * 3 + sx) * 3) as usize;
                        assert_eq!(&out[d..d + 3], &src[s..s + 3], "offset ({x_off},{y_off})");
                    } else {
                        assert_eq!(&out[d..d + 3], &[0, 0, 0], "offset ({x_off},{y_off})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_draw_box_sets_green_outline_only() {
        let (width, height) = (8, 6);
        let mut image = vec![0u8; width * height * 3];
        draw_box(&mut ImageViewMut::new(&mut image, width, height), Rect::new(1, 1, 4, 3));

        let on_outline = |x: usize, y: usize| {
            ((y == 1 || y == 4) && (1..5).contains(&x)) || ((x == 1 || x == 5) && (1..4).contains(&y))
        };
        for y in 0..height {
            for x in 0..width {
                let o = (y * width + x) * 3;
                let expected_green = if on_outline(x, y) { 255 } else { 0 };
                assert_eq!(image[o], 0);
                assert_eq!(image[o + 1], expected_green, "({x},{y})");
                assert_eq!(image[o + 2], 0);
            }
        }
    }
}
