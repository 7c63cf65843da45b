/// Number of buckets in each per-tile feedback histogram (madp and madi).
pub const FEEDBACK_BUCKETS: usize = 4;

/// Default length of the classified motion level window.
pub const DEFAULT_MOTION_WINDOW: usize = 5;

/// Smallest motion level window the smoothing score is defined for.
pub const MIN_MOTION_WINDOW: usize = 3;

/// Largest motion level window accepted by a session.
pub const MAX_MOTION_WINDOW: usize = 64;

/// Length of the raw per-frame motion flag window. Fixed: the stability
/// rule reads exactly four entries.
pub const MOTION_FLAG_WINDOW: usize = 4;

/// Default length of the smoothed flag (scene stability) window.
pub const DEFAULT_STABILITY_WINDOW: usize = 5;

/// Smallest scene stability window accepted by a session.
pub const MIN_STABILITY_WINDOW: usize = 5;

/// Largest scene stability window accepted by a session.
pub const MAX_STABILITY_WINDOW: usize = 64;

/// Number of frames of madp/madi magnitude kept per session.
pub const MAGNITUDE_WINDOW: usize = 2;

/// Smoothing score weight of the current frame's motion level.
pub const SCORE_WEIGHT_CURRENT: i64 = 13;

/// Smoothing score weight of the most recent historical level.
pub const SCORE_WEIGHT_PREV1: i64 = 11;

/// Smoothing score weight of the second most recent historical level.
pub const SCORE_WEIGHT_PREV2: i64 = 8;

/// Smoothing score weight of every older historical level.
pub const SCORE_WEIGHT_OLDER: i64 = 6;

/// Limit shift for the surveillance threshold tables (`mb * thd >> 10`).
pub const SURVEILLANCE_LIMIT_SHIFT: u32 = 10;

/// Limit shift for the general-purpose threshold tables (`mb * thd >> 15`).
pub const GENERAL_LIMIT_SHIFT: u32 = 15;

/// Pixel edge of the block grid used for complexity density.
pub const MACROBLOCK_SIZE: u32 = 16;

/// Pixel edge of the CTU grid used for auxiliary map sizing.
pub const CTU_SIZE: u32 = 64;

/// Bytes of QP-map base configuration per CTU.
pub const QPMAP_BASE_CFG_BYTES: usize = 64;

/// Bytes of QP-map QP configuration per CTU.
pub const QPMAP_QP_CFG_BYTES: usize = 192;

/// Bytes of motion-flag map per CTU.
pub const MD_FLAG_BYTES: usize = 16;

/// Intra quantization bias used when an operator override leaves it unset.
pub const DEFAULT_OVERRIDE_QBIAS_INTRA: i32 = 171;

/// Inter quantization bias used when an operator override leaves it unset.
pub const DEFAULT_OVERRIDE_QBIAS_INTER: i32 = 85;

/// Motion-estimation lambda written while the scene is in motion.
pub const MOTION_MOVE_LAMBDA: i32 = 8;

/// madp SAD band thresholds reported back by the encoder statistics.
pub const MD_SAD_THRESHOLDS: [i32; 3] = [7, 15, 25];

/// madi band thresholds reported back by the encoder statistics.
pub const MADI_THRESHOLDS: [i32; 3] = [4, 9, 15];

/// CIME thresholds paired with every skip ATF weight vector.
pub const ATF_SKIP_CIME_THRESHOLDS: [i32; 4] = [1, 2, 4, 6];

/// CIME thresholds paired with every intra ATF weight vector.
pub const ATF_INTRA_CIME_THRESHOLDS: [i32; 3] = [24, 48, 64];
