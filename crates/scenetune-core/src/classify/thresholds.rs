//! Classifier constant tables.

/// Number of madp magnitude bands per scene mode.
pub const THRESHOLD_BANDS: usize = 3;

/// Frame madp cutoffs per band, highest first. A band is selected when the
/// frame magnitude is at least its cutoff.
pub const MADP_BAND_CUTOFFS: [u32; THRESHOLD_BANDS] = [896, 640, 384];

/// Bucket weights producing the five derived motion scores.
///
/// Row 0 counts high-dispersion blocks, row 1 medium-high, row 2 both,
/// row 3 static blocks and row 4 every block.
pub const MADP_NUM_MAP: [[u64; 4]; 5] = [
    [0, 0, 0, 1],
    [0, 0, 1, 0],
    [0, 0, 1, 1],
    [1, 0, 0, 0],
    [1, 1, 1, 1],
];

/// Per-group block-count thresholds, `scene_mode * 3 + band`.
///
/// Columns 0..=2 feed the spread rule, 3..=5 the joint rule, 6 the
/// few-static rule and 7 the some-static rule.
pub const CTU_MADP_CNT_THD: [[u64; 8]; 2 * THRESHOLD_BANDS] = [
    [50, 100, 130, 50, 100, 550, 500, 550],
    [100, 150, 200, 80, 120, 500, 450, 550],
    [150, 200, 250, 100, 150, 450, 400, 450],
    [50, 100, 130, 50, 100, 550, 500, 550],
    [100, 150, 200, 80, 120, 500, 450, 550],
    [150, 200, 250, 100, 150, 450, 400, 450],
];
