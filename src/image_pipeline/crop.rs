//! Unit-scale crop converters
//!
//! Copy a rectangle out of an RGB565 or RGB888 frame into a tightly packed
//! RGB888 buffer of `crop.width` x `crop.height` pixels. Rows or columns that
//! would fall past the source edge are skipped; the matching destination
//! bytes keep their previous contents.

use crate::image_pipeline::common::{ImageView, Rect};
use crate::image_pipeline::pixel::Rgb;

pub fn crop_rgb565_to_rgb888(src: &ImageView<'_>, dst: &mut [u8], crop: Rect) {
    for y in 0..crop.height {
        let src_y = crop.y + y;
        if src_y >= src.height {
            break;
        }

        for x in 0..crop.width {
            let src_x = crop.x + x;
            if src_x >= src.width {
                break;
            }

            let s = (src_y * src.width + src_x) * 2;
            let rgb = Rgb::from_rgb565(u16::from_le_bytes([src.data[s], src.data[s + 1]]));

            let d = (y * crop.width + x) * 3;
            dst[d..d + 3].copy_from_slice(&rgb.to_array());
        }
    }
}

pub fn crop_rgb888_to_rgb888(src: &ImageView<'_>, dst: &mut [u8], crop: Rect) {
    let visible = crop.width.min(src.width.saturating_sub(crop.x));
    if visible == 0 {
        return;
    }

    for y in 0..crop.height {
        let src_y = crop.y + y;
        if src_y >= src.height {
            break;
        }

        let s = (src_y * src.width + crop.x) * 3;
        let d = y * crop.width * 3;
        dst[d..d + visible * 3].copy_from_slice(&src.data[s..s + visible * 3]);
    }
}
