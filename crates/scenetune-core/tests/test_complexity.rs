use scenetune_core::classify::complexity::{motion_density, texture_density};
use scenetune_core::classify::{classify_complexity, RateControlHints};
use scenetune_core::feedback::FrameTotals;

fn motion(m: [u64; 4]) -> FrameTotals {
    FrameTotals {
        motion: m,
        texture: [0; 4],
    }
}

fn texture(t: [u64; 4]) -> FrameTotals {
    FrameTotals {
        motion: [0; 4],
        texture: t,
    }
}

#[test]
fn test_densities_ignore_lowest_bucket() {
    let totals = FrameTotals {
        motion: [1000, 0, 0, 0],
        texture: [1000, 0, 0, 0],
    };
    assert_eq!(motion_density(&totals), 0);
    assert_eq!(texture_density(&totals), 0);
}

#[test]
fn test_motion_density_weights() {
    assert_eq!(motion_density(&motion([0, 4, 4, 4])), (17 * 4 + 22 * 4 + 24 * 4) >> 2);
}

#[test]
fn test_texture_density_weights() {
    assert_eq!(texture_density(&texture([0, 4, 4, 4])), (4 * 4 + 5 * 4 + 6 * 4) >> 2);
}

#[test]
fn test_motion_level_buckets() {
    assert_eq!(classify_complexity(&motion([0, 0, 0, 3]), 100).motion_level, 200);
    assert_eq!(classify_complexity(&motion([0, 0, 0, 1]), 100).motion_level, 100);
    assert_eq!(classify_complexity(&motion([0, 1, 0, 0]), 100).motion_level, 0);
}

#[test]
fn test_motion_level_boundary_is_exclusive() {
    // (24*2 + 22*0 + 17*0) >> 2 = 12 -> 1200, not above 15*100
    assert_eq!(classify_complexity(&motion([0, 0, 0, 2]), 100).motion_level, 100);
    // 22 >> 2 = 5 -> 500, not above 5*100
    assert_eq!(classify_complexity(&motion([0, 0, 1, 0]), 100).motion_level, 0);
}

#[test]
fn test_complex_level_buckets() {
    assert_eq!(classify_complexity(&texture([0, 0, 0, 21]), 100).complex_level, 2);
    assert_eq!(classify_complexity(&texture([0, 0, 0, 10]), 100).complex_level, 1);
    assert_eq!(classify_complexity(&texture([0, 0, 0, 9]), 100).complex_level, 0);
}

#[test]
fn test_zero_everything_is_zero() {
    assert_eq!(
        classify_complexity(&FrameTotals::default(), 0),
        RateControlHints::default()
    );
}
