use serde::Serialize;

use crate::feedback::FrameTotals;

/// Coarse motion and texture levels handed to rate control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RateControlHints {
    /// 0, 100 or 200.
    pub motion_level: u32,
    /// 0, 1 or 2.
    pub complex_level: u32,
}

/// Weighted count of high-dispersion blocks.
pub fn motion_density(totals: &FrameTotals) -> u64 {
    let m = &totals.motion;
    (24 * m[3] + 22 * m[2] + 17 * m[1]) >> 2
}

/// Weighted count of high-texture blocks.
pub fn texture_density(totals: &FrameTotals) -> u64 {
    let t = &totals.texture;
    (6 * t[3] + 5 * t[2] + 4 * t[1]) >> 2
}

/// Bucket both densities against the frame's 16x16 block count.
pub fn classify_complexity(totals: &FrameTotals, macroblocks: u64) -> RateControlHints {
    let md = motion_density(totals) * 100;
    let motion_level = if md > 15 * macroblocks {
        200
    } else if md > 5 * macroblocks {
        100
    } else {
        0
    };

    let td = texture_density(totals) * 100;
    let complex_level = if td > 30 * macroblocks {
        2
    } else if td > 13 * macroblocks {
        1
    } else {
        0
    };

    RateControlHints {
        motion_level,
        complex_level,
    }
}
