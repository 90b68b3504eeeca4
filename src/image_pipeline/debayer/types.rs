//! Bayer colour filter layouts

use std::fmt;

/// Arrangement of the top-left 2x2 filter cell of a RAW frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum BayerPattern {
    RGGB,
    BGGR,
    GRBG,
    GBRG,
}

/// Filter colour at one sensor site. Green sites are split by the colour
/// sharing their row, which decides whether red is read horizontally or
/// vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfaSite {
    Red,
    GreenOnRedRow,
    GreenOnBlueRow,
    Blue,
}

use CfaSite::{Blue, GreenOnBlueRow as Gb, GreenOnRedRow as Gr, Red};

/// `[pattern][row & 1][col & 1]`
const SITES: [[[CfaSite; 2]; 2]; 4] = [
    [[Red, Gr], [Gb, Blue]], // RGGB
    [[Blue, Gb], [Gr, Red]], // BGGR
    [[Gr, Red], [Blue, Gb]], // GRBG
    [[Gb, Blue], [Red, Gr]], // GBRG
];

impl BayerPattern {
    pub const ALL: [BayerPattern; 4] = [
        BayerPattern::RGGB,
        BayerPattern::BGGR,
        BayerPattern::GRBG,
        BayerPattern::GBRG,
    ];

    const fn index(self) -> usize {
        match self {
            BayerPattern::RGGB => 0,
            BayerPattern::BGGR => 1,
            BayerPattern::GRBG => 2,
            BayerPattern::GBRG => 3,
        }
    }

    /// Filter colour at (`row`, `col`).
    #[inline(always)]
    pub const fn site(self, row: usize, col: usize) -> CfaSite {
        SITES[self.index()][row & 1][col & 1]
    }

    /// Pattern whose first row starts with `first` then `second`, each one of
    /// `'R'`, `'G'`, `'B'`.
    pub fn from_first_row(first: char, second: char) -> Option<Self> {
        match (first, second) {
            ('R', 'G') => Some(BayerPattern::RGGB),
            ('B', 'G') => Some(BayerPattern::BGGR),
            ('G', 'R') => Some(BayerPattern::GRBG),
            ('G', 'B') => Some(BayerPattern::GBRG),
            _ => None,
        }
    }
}

impl fmt::Display for BayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BayerPattern::RGGB => "RGGB",
            BayerPattern::BGGR => "BGGR",
            BayerPattern::GRBG => "GRBG",
            BayerPattern::GBRG => "GBRG",
        };
        f.write_str(name)
    }
}
