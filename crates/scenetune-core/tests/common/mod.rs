#![allow(dead_code)]

use scenetune_core::feedback::{FrameFeedback, TileFeedback};

/// Block count used by the synthetic frames below.
pub const MB_COUNT: u32 = 1000;

/// madp that lands in the highest magnitude band.
pub const HIGH_MADP: u32 = 1000;

/// madp that lands in the middle magnitude band.
pub const MID_MADP: u32 = 700;

/// Build a single-tile frame with the given motion buckets and no texture.
pub fn motion_frame(madp: u32, motion: [u32; 4]) -> FrameFeedback {
    FrameFeedback {
        width: 512,
        height: 512,
        mb_count: MB_COUNT,
        madp,
        madi: 0,
        tiles: vec![TileFeedback {
            motion,
            texture: [0; 4],
        }],
    }
}

/// Every block in the highest dispersion bucket: classifies Large.
pub fn large_frame() -> FrameFeedback {
    motion_frame(HIGH_MADP, [0, 0, 0, MB_COUNT])
}

/// Every block in the lowest dispersion bucket: classifies Still.
pub fn still_frame() -> FrameFeedback {
    motion_frame(HIGH_MADP, [MB_COUNT, 0, 0, 0])
}

/// No statistics at all: classifies Unknown.
pub fn empty_frame() -> FrameFeedback {
    FrameFeedback::default()
}

/// Split `motion` across `n` identical tiles.
pub fn tiled_frame(n: u32, motion: [u32; 4], texture: [u32; 4]) -> FrameFeedback {
    FrameFeedback {
        width: 1920,
        height: 1080,
        mb_count: MB_COUNT,
        madp: HIGH_MADP,
        madi: 0,
        tiles: (0..n).map(|_| TileFeedback { motion, texture }).collect(),
    }
}
