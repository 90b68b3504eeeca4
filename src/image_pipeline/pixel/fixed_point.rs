//! Binary fixed-point scalars for sub-pixel addressing
//!
//! The resizer walks the source in 16.16 and the fused crop/debayer path in
//! 16.8. Both widths go through this one type so the shift used at each call
//! site is explicit in the type (`Q16` vs `Q8`) and the two paths keep their
//! own numeric behaviour.

/// Signed 32-bit fixed-point value with `FRAC` fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FixedPoint<const FRAC: u32>(i32);

/// 16.16 fixed point, used by the bilinear resizer.
pub type Q16 = FixedPoint<16>;

/// 16.8 fixed point, used by the fused crop + debayer sampler.
pub type Q8 = FixedPoint<8>;

impl<const FRAC: u32> FixedPoint<FRAC> {
    pub const ONE: i32 = 1 << FRAC;
    pub const MASK: i32 = Self::ONE - 1;

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn from_int(value: i32) -> Self {
        Self(value << FRAC)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// `(num << FRAC) / den`, truncated toward zero.
    ///
    /// The shift and divide run in 64 bits, so `num` may use the full i32
    /// range as long as the quotient fits. Panics when `den` is zero.
    pub const fn ratio(num: i32, den: i32) -> Self {
        Self((((num as i64) << FRAC) / den as i64) as i32)
    }

    /// Scales by an integer step count.
    pub const fn mul_int(self, n: i32) -> Self {
        Self(self.0 * n)
    }

    /// Integer part (arithmetic shift, rounds toward negative infinity).
    pub const fn floor(self) -> i32 {
        self.0 >> FRAC
    }

    /// Fractional part as a weight in `[0, ONE)`.
    pub const fn frac(self) -> i32 {
        self.0 & Self::MASK
    }

    /// Blends `a` toward `b` by this value's fractional part. The result is
    /// truncated, never rounded.
    #[inline(always)]
    pub const fn lerp(self, a: i32, b: i32) -> i32 {
        let w = self.frac();
        ((Self::ONE - w) * a + w * b) >> FRAC
    }
}
