use serde::{Deserialize, Serialize};

use crate::consts::{FEEDBACK_BUCKETS, MACROBLOCK_SIZE};

/// Statistics reported by one encode tile.
///
/// Bucket 0 is the lowest strength, bucket 3 the highest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileFeedback {
    /// Block counts per motion-dispersion (madp) strength bucket.
    #[serde(default)]
    pub motion: [u32; FEEDBACK_BUCKETS],
    /// Block counts per texture-density (madi) strength bucket.
    #[serde(default)]
    pub texture: [u32; FEEDBACK_BUCKETS],
}

/// Everything the encoder reports back after completing one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameFeedback {
    pub width: u32,
    pub height: u32,
    /// Encoder-reported 16x16 block count. Zero is read as one.
    #[serde(default)]
    pub mb_count: u32,
    /// Frame average motion dispersion.
    #[serde(default)]
    pub madp: u32,
    /// Frame average texture density.
    #[serde(default)]
    pub madi: u32,
    #[serde(default)]
    pub tiles: Vec<TileFeedback>,
}

impl FrameFeedback {
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Block count used to scale classifier limits.
    pub fn effective_mb_count(&self) -> u64 {
        u64::from(self.mb_count.max(1))
    }

    /// Number of 16x16 blocks covering the frame, rounding partial blocks up.
    pub fn macroblocks(&self) -> u64 {
        let cols = self.width.div_ceil(MACROBLOCK_SIZE);
        let rows = self.height.div_ceil(MACROBLOCK_SIZE);
        u64::from(cols) * u64::from(rows)
    }

    /// Frame-level bucket totals across all tiles.
    pub fn totals(&self) -> FrameTotals {
        aggregate_tiles(&self.tiles)
    }
}

/// Frame-level bucket sums.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameTotals {
    pub motion: [u64; FEEDBACK_BUCKETS],
    pub texture: [u64; FEEDBACK_BUCKETS],
}

/// Sum per-tile bucket counts into frame totals. No tiles yields zeros.
pub fn aggregate_tiles(tiles: &[TileFeedback]) -> FrameTotals {
    tiles.iter().fold(FrameTotals::default(), |mut acc, tile| {
        for b in 0..FEEDBACK_BUCKETS {
            acc.motion[b] += u64::from(tile.motion[b]);
            acc.texture[b] += u64::from(tile.texture[b]);
        }
        acc
    })
}

/// A recorded sequence of frame feedback, replayable through a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub frames: Vec<FrameFeedback>,
}
