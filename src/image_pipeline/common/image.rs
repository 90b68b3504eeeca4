//! Borrowed image buffers
//!
//! Buffers carry no header and no stride padding: the width is the row
//! pitch in pixels. The pixel format is tracked by the caller and passed
//! to each operation separately.

/// Read-only view over a caller-owned image buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    pub data: &'a [u8],
    pub width: usize,
    pub height: usize,
}

impl<'a> ImageView<'a> {
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Self {
        Self { data, width, height }
    }
}

/// Writable view over a caller-owned image buffer.
#[derive(Debug)]
pub struct ImageViewMut<'a> {
    pub data: &'a mut [u8],
    pub width: usize,
    pub height: usize,
}

impl<'a> ImageViewMut<'a> {
    pub fn new(data: &'a mut [u8], width: usize, height: usize) -> Self {
        Self { data, width, height }
    }
}

/// Axis-aligned pixel rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }
}
