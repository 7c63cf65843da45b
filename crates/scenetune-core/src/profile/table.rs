//! Precomputed tuning profiles.

use serde::{Deserialize, Serialize};

use crate::error::TuneError;

/// Which of the four tuning profiles applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileIndex {
    SurveillanceStill,
    SurveillanceMotion,
    GeneralStill,
    /// Also used as the quality-priority profile.
    GeneralMotion,
}

impl ProfileIndex {
    pub const ALL: [ProfileIndex; 4] = [
        ProfileIndex::SurveillanceStill,
        ProfileIndex::SurveillanceMotion,
        ProfileIndex::GeneralStill,
        ProfileIndex::GeneralMotion,
    ];

    pub fn as_u32(self) -> u32 {
        match self {
            Self::SurveillanceStill => 0,
            Self::SurveillanceMotion => 1,
            Self::GeneralStill => 2,
            Self::GeneralMotion => 3,
        }
    }
}

impl TryFrom<u32> for ProfileIndex {
    type Error = TuneError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::SurveillanceStill),
            1 => Ok(Self::SurveillanceMotion),
            2 => Ok(Self::GeneralStill),
            3 => Ok(Self::GeneralMotion),
            _ => Err(TuneError::ProfileIndexOutOfRange { index }),
        }
    }
}

impl std::fmt::Display for ProfileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SurveillanceStill => write!(f, "Surveillance / Still"),
            Self::SurveillanceMotion => write!(f, "Surveillance / Motion"),
            Self::GeneralStill => write!(f, "General / Still"),
            Self::GeneralMotion => write!(f, "General / Motion"),
        }
    }
}

/// Pre-intra mode decision cost weights.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreIntraWeights {
    pub lvl32_cst_wgt: [i32; 8],
    pub lvl16_cst_wgt: [i32; 8],
    pub b32_cost: [i32; 2],
    pub b16_cost: [i32; 2],
}

/// Adaptive filter (ATF) weights per block size. Skip vectors have 13
/// entries, intra vectors 12.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtfWeights {
    pub skip_b64: [i32; 13],
    pub intra_b32: [i32; 12],
    pub skip_b32: [i32; 13],
    pub intra_b16: [i32; 12],
    pub skip_b16: [i32; 13],
    pub intra_b8: [i32; 12],
    pub skip_b8: [i32; 13],
}

/// Motion search multipliers and SAD early-out thresholds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub cime_multi: [i32; 4],
    pub rime_multi: [i32; 3],
    pub rime_cime_sad_th: i32,
    pub fme_cime_sad_pu16_th: i32,
    pub fme_cime_sad_pu32_th: i32,
    pub fme_cime_sad_pu64_th: i32,
}

/// Sobel edge weighting per QP band.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientWeights {
    pub lvl16_sobel_a: [i32; 9],
    pub lvl16_sobel_c: [i32; 9],
    pub lvl16_sobel_d: [i32; 9],
    pub lvl32_sobel_a: [i32; 5],
    pub lvl32_sobel_c: [i32; 5],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantBias {
    pub intra: i32,
    pub inter: i32,
}

/// A complete parameter set for one [`ProfileIndex`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningProfile {
    pub pre_intra: PreIntraWeights,
    pub atf: AtfWeights,
    pub search: SearchParams,
    pub gradient: GradientWeights,
    pub qbias: QuantBias,
    pub chroma_klut_offset: i32,
}

/// The four profiles, keyed by [`ProfileIndex`]. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileTable {
    pub surveillance_still: TuningProfile,
    pub surveillance_motion: TuningProfile,
    pub general_still: TuningProfile,
    pub general_motion: TuningProfile,
}

impl ProfileTable {
    /// The factory-tuned table.
    pub fn builtin() -> Self {
        BUILTIN_PROFILES.clone()
    }

    pub fn get(&self, index: ProfileIndex) -> &TuningProfile {
        match index {
            ProfileIndex::SurveillanceStill => &self.surveillance_still,
            ProfileIndex::SurveillanceMotion => &self.surveillance_motion,
            ProfileIndex::GeneralStill => &self.general_still,
            ProfileIndex::GeneralMotion => &self.general_motion,
        }
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::ops::Index<ProfileIndex> for ProfileTable {
    type Output = TuningProfile;

    fn index(&self, index: ProfileIndex) -> &TuningProfile {
        self.get(index)
    }
}

const SKIP_FLAT: [i32; 13] = [16; 13];
const INTRA_FLAT: [i32; 12] = [16; 12];
const SKIP_STILL: [i32; 13] = [16, 13, 14, 15, 14, 14, 15, 15, 15, 16, 16, 16, 16];
const INTRA_SURVEILLANCE_STILL: [i32; 12] = [24, 23, 23, 23, 22, 21, 20, 19, 18, 16, 16, 16];
const INTRA_SURVEILLANCE_MOTION: [i32; 12] = [21, 20, 19, 20, 19, 18, 19, 18, 18, 18, 18, 17];
const INTRA_GENERAL_STILL: [i32; 12] = [20, 19, 18, 19, 18, 17, 18, 17, 17, 16, 16, 16];

const GRADIENT_NEUTRAL: GradientWeights = GradientWeights {
    lvl16_sobel_a: [16; 9],
    lvl16_sobel_c: [16; 9],
    lvl16_sobel_d: [0; 9],
    lvl32_sobel_a: [16; 5],
    lvl32_sobel_c: [16; 5],
};

static BUILTIN_PROFILES: ProfileTable = ProfileTable {
    surveillance_still: TuningProfile {
        pre_intra: PreIntraWeights {
            lvl32_cst_wgt: [21, 20, 19, 18, 20, 22, 24, 16],
            lvl16_cst_wgt: [21, 20, 19, 18, 20, 22, 24, 16],
            b32_cost: [31, 30],
            b16_cost: [31, 30],
        },
        atf: AtfWeights {
            skip_b64: SKIP_STILL,
            intra_b32: INTRA_SURVEILLANCE_STILL,
            skip_b32: SKIP_STILL,
            intra_b16: INTRA_SURVEILLANCE_STILL,
            skip_b16: SKIP_STILL,
            intra_b8: INTRA_SURVEILLANCE_STILL,
            skip_b8: SKIP_STILL,
        },
        search: SearchParams {
            cime_multi: [4, 8, 24, 24],
            rime_multi: [4, 32, 128],
            rime_cime_sad_th: 48,
            fme_cime_sad_pu16_th: 16,
            fme_cime_sad_pu32_th: 16,
            fme_cime_sad_pu64_th: 16,
        },
        gradient: GradientWeights {
            lvl16_sobel_a: [32; 9],
            lvl16_sobel_c: [13; 9],
            lvl16_sobel_d: [23750; 9],
            lvl32_sobel_a: [18; 5],
            lvl32_sobel_c: [16; 5],
        },
        qbias: QuantBias {
            intra: 128,
            inter: 60,
        },
        chroma_klut_offset: 3,
    },
    surveillance_motion: TuningProfile {
        pre_intra: PreIntraWeights {
            lvl32_cst_wgt: [19, 18, 17, 16, 18, 20, 21, 16],
            lvl16_cst_wgt: [19, 18, 17, 16, 18, 20, 21, 16],
            b32_cost: [23, 20],
            b16_cost: [23, 20],
        },
        atf: AtfWeights {
            skip_b64: SKIP_FLAT,
            intra_b32: INTRA_SURVEILLANCE_MOTION,
            skip_b32: SKIP_FLAT,
            intra_b16: INTRA_SURVEILLANCE_MOTION,
            skip_b16: SKIP_FLAT,
            intra_b8: INTRA_SURVEILLANCE_MOTION,
            skip_b8: SKIP_FLAT,
        },
        search: SearchParams {
            cime_multi: [4, 7, 20, 20],
            rime_multi: [4, 16, 64],
            rime_cime_sad_th: 0,
            fme_cime_sad_pu16_th: 0,
            fme_cime_sad_pu32_th: 0,
            fme_cime_sad_pu64_th: 0,
        },
        gradient: GRADIENT_NEUTRAL,
        qbias: QuantBias {
            intra: 128,
            inter: 60,
        },
        chroma_klut_offset: 0,
    },
    general_still: TuningProfile {
        pre_intra: PreIntraWeights {
            lvl32_cst_wgt: [20, 19, 18, 17, 19, 21, 22, 16],
            lvl16_cst_wgt: [20, 19, 18, 17, 19, 21, 22, 16],
            b32_cost: [31, 30],
            b16_cost: [31, 30],
        },
        atf: AtfWeights {
            skip_b64: [16, 14, 15, 16, 14, 14, 15, 15, 15, 16, 16, 16, 16],
            intra_b32: INTRA_GENERAL_STILL,
            skip_b32: [18, 14, 14, 15, 14, 14, 15, 15, 15, 16, 16, 16, 16],
            intra_b16: INTRA_GENERAL_STILL,
            skip_b16: SKIP_FLAT,
            intra_b8: INTRA_GENERAL_STILL,
            skip_b8: SKIP_FLAT,
        },
        search: SearchParams {
            cime_multi: [4, 8, 24, 24],
            rime_multi: [4, 32, 128],
            rime_cime_sad_th: 0,
            fme_cime_sad_pu16_th: 0,
            fme_cime_sad_pu32_th: 0,
            fme_cime_sad_pu64_th: 0,
        },
        gradient: GRADIENT_NEUTRAL,
        qbias: QuantBias {
            intra: 128,
            inter: 85,
        },
        chroma_klut_offset: 0,
    },
    general_motion: TuningProfile {
        pre_intra: PreIntraWeights {
            lvl32_cst_wgt: [16; 8],
            lvl16_cst_wgt: [16; 8],
            b32_cost: [23, 20],
            b16_cost: [23, 20],
        },
        atf: AtfWeights {
            skip_b64: SKIP_FLAT,
            intra_b32: INTRA_FLAT,
            skip_b32: SKIP_FLAT,
            intra_b16: INTRA_FLAT,
            skip_b16: SKIP_FLAT,
            intra_b8: INTRA_FLAT,
            skip_b8: SKIP_FLAT,
        },
        search: SearchParams {
            cime_multi: [4, 4, 4, 4],
            rime_multi: [4, 4, 4],
            rime_cime_sad_th: 0,
            fme_cime_sad_pu16_th: 0,
            fme_cime_sad_pu32_th: 0,
            fme_cime_sad_pu64_th: 0,
        },
        gradient: GRADIENT_NEUTRAL,
        qbias: QuantBias {
            intra: 128,
            inter: 85,
        },
        chroma_klut_offset: 0,
    },
};
