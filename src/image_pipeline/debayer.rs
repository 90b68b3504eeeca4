//! Debayering module for converting Bayer-pattern RAW8 frames to RGB888
//!
//! Both the full-frame demosaic and the fused crop/scale sampler classify a
//! site through the same pattern table and rebuild the missing channels with
//! the same neighbour stencil.

pub mod cpu_debayer;
pub mod crop_debayer;
pub mod types;

#[cfg(test)]
mod tests;

pub use cpu_debayer::debayer;
pub use crop_debayer::crop_and_debayer;
pub use types::{BayerPattern, CfaSite};

/// Rebuilds `[r, g, b]` at flat index `idx` of a Bayer plane with row pitch
/// `width`. `idx` must not lie on the outer 1-pixel ring.
#[inline(always)]
pub(crate) fn interpolate(raw: &[u8], width: usize, idx: usize, site: CfaSite) -> [u32; 3] {
    let at = |i: usize| raw[i] as u32;
    let center = at(idx);

    let cross = || (at(idx - 1) + at(idx + 1) + at(idx - width) + at(idx + width)) / 4;
    let diagonal = || {
        (at(idx - width - 1) + at(idx - width + 1) + at(idx + width - 1) + at(idx + width + 1)) / 4
    };
    let horizontal = || (at(idx - 1) + at(idx + 1)) / 2;
    let vertical = || (at(idx - width) + at(idx + width)) / 2;

    match site {
        CfaSite::Red => [center, cross(), diagonal()],
        CfaSite::Blue => [diagonal(), cross(), center],
        CfaSite::GreenOnRedRow => [horizontal(), center, vertical()],
        CfaSite::GreenOnBlueRow => [vertical(), center, horizontal()],
    }
}
