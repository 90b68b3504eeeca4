use crate::image_pipeline::common::{ImageView, ImageViewMut};
use crate::image_pipeline::debayer::{BayerPattern, CfaSite, crop_and_debayer, debayer};

const SENTINEL: u8 = 0xAA;

fn textured_raw(width: usize, height: usize) -> Vec<u8> {
    (0..width * height).map(|i| ((i * 37 + 11) % 251) as u8).collect()
}

fn rgb_at(rgb: &[u8], width: usize, x: usize, y: usize) -> [u8; 3] {
    let o = (y * width + x) * 3;
    [rgb[o], rgb[o + 1], rgb[o + 2]]
}

#[test]
fn test_pattern_table_matches_layout_names() {
    use CfaSite::*;
    let expect = [
        (BayerPattern::RGGB, [Red, GreenOnRedRow, GreenOnBlueRow, Blue]),
        (BayerPattern::BGGR, [Blue, GreenOnBlueRow, GreenOnRedRow, Red]),
        (BayerPattern::GRBG, [GreenOnRedRow, Red, Blue, GreenOnBlueRow]),
        (BayerPattern::GBRG, [GreenOnBlueRow, Blue, Red, GreenOnRedRow]),
    ];
    for (pattern, sites) in expect {
        assert_eq!(pattern.site(0, 0), sites[0], "{pattern}");
        assert_eq!(pattern.site(0, 1), sites[1], "{pattern}");
        assert_eq!(pattern.site(1, 0), sites[2], "{pattern}");
        assert_eq!(pattern.site(1, 1), sites[3], "{pattern}");
        // the cell repeats every 2 pixels
        assert_eq!(pattern.site(6, 9), sites[1], "{pattern}");
    }
}

#[test]
fn test_from_first_row() {
    assert_eq!(BayerPattern::from_first_row('R', 'G'), Some(BayerPattern::RGGB));
    assert_eq!(BayerPattern::from_first_row('G', 'B'), Some(BayerPattern::GBRG));
    assert_eq!(BayerPattern::from_first_row('R', 'B'), None);
}

#[test]
fn test_debayer_leaves_border_untouched() {
    for (width, height) in [(3, 3), (4, 4), (7, 5), (16, 9)] {
        let raw = textured_raw(width, height);
        for pattern in BayerPattern::ALL {
            let mut rgb = vec![SENTINEL; width * height * 3];
            debayer(&ImageView::new(&raw, width, height), &mut rgb, pattern, false);

            for y in 0..height {
                for x in 0..width {
                    let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                    if on_border {
                        assert_eq!(
                            rgb_at(&rgb, width, x, y),
                            [SENTINEL; 3],
                            "{pattern} {width}x{height} at ({x},{y})"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_debayer_uniform_4x4() {
    let raw = vec![100u8; 16];
    for pattern in BayerPattern::ALL {
        for swap in [false, true] {
            let mut rgb = vec![0u8; 16 * 3];
            debayer(&ImageView::new(&raw, 4, 4), &mut rgb, pattern, swap);
            for y in 1..3 {
                for x in 1..3 {
                    assert_eq!(rgb_at(&rgb, 4, x, y), [100, 100, 100], "{pattern} swap={swap}");
                }
            }
        }
    }
}

/// Each site holds a per-channel plane `base + 2x + 3y`; averaging symmetric
/// neighbours of a linear ramp reproduces the ramp at the centre.
#[test]
fn test_debayer_linear_ramp_per_channel() {
    let (width, height) = (16, 12);
    let ramp = |base: i32, x: usize, y: usize| base + 2 * x as i32 + 3 * y as i32;
    let bases = [20, 60, 100];

    for pattern in BayerPattern::ALL {
        let raw: Vec<u8> = (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                let channel = match pattern.site(y, x) {
                    CfaSite::Red => 0,
                    CfaSite::GreenOnRedRow | CfaSite::GreenOnBlueRow => 1,
                    CfaSite::Blue => 2,
                };
                ramp(bases[channel], x, y) as u8
            })
            .collect();

        let mut rgb = vec![0u8; width * height * 3];
        debayer(&ImageView::new(&raw, width, height), &mut rgb, pattern, false);

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let got = rgb_at(&rgb, width, x, y);
                for c in 0..3 {
                    let expected = ramp(bases[c], x, y);
                    assert!(
                        (got[c] as i32 - expected).abs() <= 1,
                        "{pattern} ({x},{y}) channel {c}: got {}, expected {expected}",
                        got[c]
                    );
                }
            }
        }
    }
}

#[test]
fn test_debayer_swap_red_blue() {
    let (width, height) = (8, 6);
    let raw = textured_raw(width, height);
    let mut straight = vec![0u8; width * height * 3];
    let mut swapped = vec![0u8; width * height * 3];
    let view = ImageView::new(&raw, width, height);

    debayer(&view, &mut straight, BayerPattern::BGGR, false);
    debayer(&view, &mut swapped, BayerPattern::BGGR, true);

    for (a, b) in straight.chunks_exact(3).zip(swapped.chunks_exact(3)) {
        assert_eq!([a[2], a[1], a[0]], [b[0], b[1], b[2]]);
    }
}

#[test]
fn test_debayer_green_site_orientation() {
    // GRBG: (1,1) is green on a blue row, so red comes from above/below.
    #[rustfmt::skip]
    let raw = [
        0,  10,  0, 0,
        40, 100, 60, 0,
        0,  30,  0, 0,
        0,  0,   0, 0,
    ];
    let mut rgb = vec![0u8; 16 * 3];
    debayer(&ImageView::new(&raw, 4, 4), &mut rgb, BayerPattern::GRBG, false);
    assert_eq!(rgb_at(&rgb, 4, 1, 1), [20, 100, 50]);

    // GBRG: the same site is green on a red row, red comes from the sides.
    debayer(&ImageView::new(&raw, 4, 4), &mut rgb, BayerPattern::GBRG, false);
    assert_eq!(rgb_at(&rgb, 4, 1, 1), [50, 100, 20]);
}

#[test]
fn test_crop_and_debayer_uniform_2x2() {
    let (width, height) = (10, 8);
    let raw = vec![77u8; width * height];
    let src = ImageView::new(&raw, width, height);

    for (crop_x, crop_y) in [(0, 0), (1, 1), (2, 1), (3, 2)] {
        let mut out = vec![0u8; 2 * 2 * 3];
        let mut dst = ImageViewMut::new(&mut out, 2, 2);
        crop_and_debayer(&src, crop_x, crop_y, &mut dst, BayerPattern::RGGB);
        assert!(out.iter().all(|&v| v == 77), "crop ({crop_x},{crop_y}): {out:?}");
    }
}

#[test]
fn test_crop_and_debayer_matches_debayer_at_unit_scale() {
    let (width, height) = (12, 10);
    let raw = textured_raw(width, height);
    let src = ImageView::new(&raw, width, height);

    for pattern in BayerPattern::ALL {
        let mut full = vec![0u8; width * height * 3];
        debayer(&src, &mut full, pattern, false);

        // dst_dim - 1 == src_dim - 2 walks the source one pixel per step
        let (dst_w, dst_h) = (width - 1, height - 1);
        let mut out = vec![0u8; dst_w * dst_h * 3];
        crop_and_debayer(&src, 0, 0, &mut ImageViewMut::new(&mut out, dst_w, dst_h), pattern);

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                assert_eq!(
                    rgb_at(&out, dst_w, x, y),
                    rgb_at(&full, width, x, y),
                    "{pattern} at ({x},{y})"
                );
            }
        }
        // column 0 clamps onto source column 1
        assert_eq!(rgb_at(&out, dst_w, 0, 3), rgb_at(&full, width, 1, 3));
    }
}

#[test]
fn test_crop_and_debayer_center_crop_samples_inside_crop() {
    // Bright frame with a dark 8x8 window centred in a 16x16 source; a
    // centred 4x4 crop must only sample the dark window.
    let (width, height) = (16, 16);
    let mut raw = vec![250u8; width * height];
    for y in 4..12 {
        for x in 4..12 {
            raw[y * width + x] = 10;
        }
    }
    let mut out = vec![0u8; 4 * 4 * 3];
    crop_and_debayer(
        &ImageView::new(&raw, width, height),
        5,
        5,
        &mut ImageViewMut::new(&mut out, 4, 4),
        BayerPattern::GBRG,
    );
    assert!(out.iter().all(|&v| v == 10), "{out:?}");
}

#[test]
fn test_crop_and_debayer_oversized_crop_clamps() {
    let (width, height) = (8, 8);
    let raw = vec![33u8; width * height];
    let mut out = vec![0u8; 3 * 3 * 3];
    // span goes negative; every coordinate clamps back inside [1, 6]
    crop_and_debayer(
        &ImageView::new(&raw, width, height),
        6,
        7,
        &mut ImageViewMut::new(&mut out, 3, 3),
        BayerPattern::BGGR,
    );
    assert!(out.iter().all(|&v| v == 33));
}

#[test]
fn test_crop_and_debayer_downscale_picks_exact_sites() {
    // span 16 - 2 - 2 * 5 = 4 over dst - 1 = 3 steps: floor(d * 4 / 3) + 5
    let (width, height) = (16, 16);
    let raw = textured_raw(width, height);
    let src = ImageView::new(&raw, width, height);
    let expected_sites = [5, 6, 7, 9];

    for pattern in BayerPattern::ALL {
        let mut full = vec![0u8; width * height * 3];
        debayer(&src, &mut full, pattern, false);

        let mut out = vec![0u8; 4 * 4 * 3];
        crop_and_debayer(&src, 5, 5, &mut ImageViewMut::new(&mut out, 4, 4), pattern);

        for (dy, &sy) in expected_sites.iter().enumerate() {
            for (dx, &sx) in expected_sites.iter().enumerate() {
                assert_eq!(
                    rgb_at(&out, 4, dx, dy),
                    rgb_at(&full, width, sx, sy),
                    "{pattern} dst ({dx},{dy}) -> src ({sx},{sy})"
                );
            }
        }
    }
}

#[test]
fn test_crop_and_debayer_wide_frame_reaches_far_edge() {
    // d * span passes 2^23 here, which overflows a 32-bit `<< 8`
    let (width, height) = (3000, 4);
    let raw: Vec<u8> = (0..width * height)
        .map(|i| if i % width < width / 2 { 10 } else { 200 })
        .collect();
    let (dst_w, dst_h) = (3000, 2);
    let mut out = vec![0u8; dst_w * dst_h * 3];
    crop_and_debayer(
        &ImageView::new(&raw, width, height),
        0,
        0,
        &mut ImageViewMut::new(&mut out, dst_w, dst_h),
        BayerPattern::RGGB,
    );

    assert_eq!(rgb_at(&out, dst_w, 0, 0), [10, 10, 10]);
    assert_eq!(rgb_at(&out, dst_w, dst_w - 1, 1), [200, 200, 200]);
    assert_eq!(rgb_at(&out, dst_w, 2 * dst_w / 3, 1), [200, 200, 200]);
}
