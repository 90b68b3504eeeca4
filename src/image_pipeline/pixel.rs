//! Pixel formats and the pack/unpack codec shared by the resampling and
//! conversion stages.

pub mod fixed_point;

pub use fixed_point::{FixedPoint, Q16, Q8};

/// Packed pixel layouts a buffer can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit luminance, 1 byte per pixel
    Grayscale,
    /// 5-6-5 bit RGB, 2 bytes per pixel, little endian
    Rgb565,
    /// 8 bits per channel in R, G, B order, 3 bytes per pixel
    Rgb888,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Grayscale => 1,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgb888 => 3,
        }
    }

    /// Size in bytes of a `width` x `height` buffer in this format.
    pub const fn frame_size(self, width: usize, height: usize) -> usize {
        width * height * self.bytes_per_pixel()
    }

    /// Reads the pixel stored at the start of `buf`.
    ///
    /// RGB565 channels are widened by a plain left shift here (low bits
    /// zero); the bilinear resizer depends on that exact expansion.
    #[inline(always)]
    pub fn unpack(self, buf: &[u8]) -> Rgb {
        match self {
            PixelFormat::Grayscale => Rgb::splat(buf[0]),
            PixelFormat::Rgb565 => Rgb::from_rgb565_shifted(u16::from_le_bytes([buf[0], buf[1]])),
            PixelFormat::Rgb888 => Rgb::new(buf[0], buf[1], buf[2]),
        }
    }

    /// Writes `rgb` at the start of `buf`.
    #[inline(always)]
    pub fn pack(self, rgb: Rgb, buf: &mut [u8]) {
        match self {
            PixelFormat::Grayscale => buf[0] = rgb.luma(),
            PixelFormat::Rgb565 => buf[..2].copy_from_slice(&rgb.to_rgb565().to_le_bytes()),
            PixelFormat::Rgb888 => buf[..3].copy_from_slice(&rgb.to_array()),
        }
    }
}

/// Unpacked 8-bit-per-channel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn splat(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Expands an RGB565 value, replicating the high bits into the low
    /// bits so that 0x1F maps to 0xFF.
    pub const fn from_rgb565(px: u16) -> Self {
        let r5 = ((px >> 11) & 0x1F) as u8;
        let g6 = ((px >> 5) & 0x3F) as u8;
        let b5 = (px & 0x1F) as u8;
        Self {
            r: (r5 << 3) | (r5 >> 2),
            g: (g6 << 2) | (g6 >> 4),
            b: (b5 << 3) | (b5 >> 2),
        }
    }

    /// Expands an RGB565 value by shifting only.
    pub const fn from_rgb565_shifted(px: u16) -> Self {
        Self {
            r: (((px >> 11) & 0x1F) << 3) as u8,
            g: (((px >> 5) & 0x3F) << 2) as u8,
            b: ((px & 0x1F) << 3) as u8,
        }
    }

    /// Drops the low bits of each channel down to 5-6-5 precision.
    pub const fn to_rgb565(self) -> u16 {
        ((self.r as u16 >> 3) << 11) | ((self.g as u16 >> 2) << 5) | (self.b as u16 >> 3)
    }

    /// Integer luma, `(299R + 587G + 114B) / 1000`, truncated.
    pub const fn luma(self) -> u8 {
        ((self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000) as u8
    }

    pub const fn swap_red_blue(self) -> Self {
        Self { r: self.b, g: self.g, b: self.r }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Converts a whole RGB565 frame into RGB888 using bit-replicated expansion.
pub fn convert_rgb565_to_rgb888(src: &[u8], dst: &mut [u8], width: usize, height: usize) {
    let pixels = width * height;
    let src = &src[..pixels * 2];
    let dst = &mut dst[..pixels * 3];

    for (px, out) in src.chunks_exact(2).zip(dst.chunks_exact_mut(3)) {
        let rgb = Rgb::from_rgb565(u16::from_le_bytes([px[0], px[1]]));
        out.copy_from_slice(&rgb.to_array());
    }
}
