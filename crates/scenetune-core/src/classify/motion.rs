//! Per-frame motion level classification and temporal smoothing.

use serde::Serialize;
use tracing::trace;

use crate::config::SceneMode;
use crate::consts::{
    MAGNITUDE_WINDOW, SCORE_WEIGHT_CURRENT, SCORE_WEIGHT_OLDER, SCORE_WEIGHT_PREV1,
    SCORE_WEIGHT_PREV2,
};
use crate::feedback::{FrameFeedback, FrameTotals};
use crate::history::Window;

use super::thresholds::{CTU_MADP_CNT_THD, MADP_BAND_CUTOFFS, MADP_NUM_MAP, THRESHOLD_BANDS};

/// Classified motion intensity of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MotionLevel {
    #[default]
    Still,
    Moderate,
    Large,
    /// No motion statistics were reported.
    Unknown,
}

impl MotionLevel {
    /// Contribution of this level to the smoothing score.
    pub fn weight(self) -> i64 {
        match self {
            Self::Still | Self::Unknown => 0,
            Self::Moderate => 1,
            Self::Large => 2,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Self::Still => 0,
            Self::Moderate => 1,
            Self::Large => 2,
            Self::Unknown => 3,
        }
    }
}

impl std::fmt::Display for MotionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Still => write!(f, "Still"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Large => write!(f, "Large"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Derived scores and scaled limits a rule is evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleInput {
    pub scores: [u64; 5],
    pub limits: [u64; 8],
}

/// One step of the classification ladder.
#[derive(Clone, Copy, Debug)]
pub struct MotionRule {
    pub name: &'static str,
    pub test: fn(&RuleInput) -> bool,
    pub outcome: MotionLevel,
}

/// Rules in priority order; the first one that fires decides the level.
pub const MOTION_RULES: [MotionRule; 4] = [
    MotionRule {
        name: "spread",
        test: spread_motion,
        outcome: MotionLevel::Large,
    },
    MotionRule {
        name: "joint",
        test: joint_motion,
        outcome: MotionLevel::Large,
    },
    MotionRule {
        name: "few_static",
        test: few_static_blocks,
        outcome: MotionLevel::Large,
    },
    MotionRule {
        name: "some_static",
        test: some_static_blocks,
        outcome: MotionLevel::Moderate,
    },
];

fn spread_motion(i: &RuleInput) -> bool {
    i.scores[0] > i.limits[0] || i.scores[1] > i.limits[1] || i.scores[2] > i.limits[2]
}

fn joint_motion(i: &RuleInput) -> bool {
    (i.scores[0] > i.limits[3] || i.scores[1] > i.limits[4]) && i.scores[3] < i.limits[5]
}

fn few_static_blocks(i: &RuleInput) -> bool {
    i.scores[3] < i.limits[6]
}

fn some_static_blocks(i: &RuleInput) -> bool {
    i.scores[3] < i.limits[7]
}

/// Run the ladder. Returns the level and the name of the rule that fired.
pub fn evaluate_rules(input: &RuleInput) -> (MotionLevel, Option<&'static str>) {
    MOTION_RULES
        .iter()
        .find(|rule| (rule.test)(input))
        .map_or((MotionLevel::Still, None), |rule| {
            (rule.outcome, Some(rule.name))
        })
}

/// Weighted bucket scores, see [`MADP_NUM_MAP`].
pub fn bucket_scores(totals: &FrameTotals) -> [u64; 5] {
    let mut scores = [0u64; 5];
    for (score, weights) in scores.iter_mut().zip(MADP_NUM_MAP.iter()) {
        *score = totals
            .motion
            .iter()
            .zip(weights.iter())
            .map(|(count, w)| count * w)
            .sum();
    }
    scores
}

/// First band whose cutoff `magnitude` meets or exceeds.
pub fn select_band(magnitude: Option<u32>) -> Option<usize> {
    let magnitude = magnitude?;
    MADP_BAND_CUTOFFS
        .iter()
        .position(|&cutoff| magnitude >= cutoff)
}

/// Scaled limits for one threshold group: `mb_count * thd >> shift`.
pub fn band_limits(scene_mode: SceneMode, band: usize, mb_count: u64) -> [u64; 8] {
    let group = scene_mode.index() as usize * THRESHOLD_BANDS + band;
    let shift = scene_mode.limit_shift();
    CTU_MADP_CNT_THD[group].map(|thd| (mb_count * thd) >> shift)
}

/// Outcome of classifying a single frame, before smoothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MotionVerdict {
    pub level: MotionLevel,
    /// Magnitude band the limits came from.
    pub band: Option<usize>,
    /// Ladder rule that fired; `None` for the default or Unknown.
    pub rule: Option<&'static str>,
}

/// Classify one frame from its totals and the most recent madp magnitude.
pub fn classify_frame(
    totals: &FrameTotals,
    mb_count: u64,
    magnitude: Option<u32>,
    scene_mode: SceneMode,
) -> MotionVerdict {
    let scores = bucket_scores(totals);
    if scores[4] == 0 {
        return MotionVerdict {
            level: MotionLevel::Unknown,
            band: None,
            rule: None,
        };
    }

    let Some(band) = select_band(magnitude) else {
        return MotionVerdict {
            level: MotionLevel::Still,
            band: None,
            rule: None,
        };
    };

    let input = RuleInput {
        scores,
        limits: band_limits(scene_mode, band, mb_count),
    };
    let (level, rule) = evaluate_rules(&input);
    MotionVerdict {
        level,
        band: Some(band),
        rule,
    }
}

/// Score a window must reach for the frame to count as moving.
///
/// Saturates instead of overflowing for windows longer than any session
/// accepts.
pub fn score_threshold(window_len: usize) -> i64 {
    let older = i64::try_from(window_len.saturating_sub(2)).unwrap_or(i64::MAX);
    older
        .saturating_mul(SCORE_WEIGHT_OLDER)
        .saturating_add(2 * (SCORE_WEIGHT_PREV2 + SCORE_WEIGHT_PREV1 + SCORE_WEIGHT_CURRENT))
        / 2
}

/// Smoothing score and the threshold it is compared against.
///
/// Unknown frames drop the current-level term and lower the threshold by
/// the same weight.
pub fn smoothing_score(level: MotionLevel, history: &Window<MotionLevel>) -> (i64, i64) {
    let mut threshold = score_threshold(history.len());
    let mut score = history
        .iter()
        .enumerate()
        .map(|(age, l)| {
            let w = match age {
                0 => SCORE_WEIGHT_PREV1,
                1 => SCORE_WEIGHT_PREV2,
                _ => SCORE_WEIGHT_OLDER,
            };
            l.weight() * w
        })
        .sum::<i64>();

    if level == MotionLevel::Unknown {
        threshold -= SCORE_WEIGHT_CURRENT;
    } else {
        score += level.weight() * SCORE_WEIGHT_CURRENT;
    }
    (score, threshold)
}

/// Classifier output for one completed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MotionDecision {
    pub verdict: MotionVerdict,
    pub score: i64,
    pub threshold: i64,
    /// Unsmoothed per-frame motion flag.
    pub raw_flag: bool,
}

/// Classifier state carried from frame to frame.
#[derive(Clone, Debug)]
pub struct MotionLevelClassifier {
    levels: Window<MotionLevel>,
    motion_magnitudes: Window<Option<u32>>,
    texture_magnitudes: Window<Option<u32>>,
}

impl MotionLevelClassifier {
    pub fn new(window_len: usize) -> Self {
        Self {
            levels: Window::filled(window_len, MotionLevel::Still),
            motion_magnitudes: Window::filled(MAGNITUDE_WINDOW, None),
            texture_magnitudes: Window::filled(MAGNITUDE_WINDOW, None),
        }
    }

    /// Classify a completed frame and advance the level window.
    ///
    /// The level window is left untouched for Unknown frames.
    pub fn observe(
        &mut self,
        feedback: &FrameFeedback,
        totals: &FrameTotals,
        scene_mode: SceneMode,
    ) -> MotionDecision {
        self.motion_magnitudes.push(Some(feedback.madp));
        self.texture_magnitudes.push(Some(feedback.madi));

        let verdict = classify_frame(
            totals,
            feedback.effective_mb_count(),
            self.motion_magnitudes[0],
            scene_mode,
        );
        let (score, threshold) = smoothing_score(verdict.level, &self.levels);
        let raw_flag = score >= threshold;

        trace!(
            level = %verdict.level,
            band = ?verdict.band,
            rule = ?verdict.rule,
            score,
            threshold,
            "Motion level classified"
        );

        if verdict.level != MotionLevel::Unknown {
            self.levels.push(verdict.level);
        }

        MotionDecision {
            verdict,
            score,
            threshold,
            raw_flag,
        }
    }

    /// Classified levels, newest first.
    pub fn levels(&self) -> &Window<MotionLevel> {
        &self.levels
    }

    /// madp of the last two frames, newest first.
    pub fn motion_magnitudes(&self) -> &Window<Option<u32>> {
        &self.motion_magnitudes
    }

    /// madi of the last two frames, newest first. Not used for classification.
    pub fn texture_magnitudes(&self) -> &Window<Option<u32>> {
        &self.texture_magnitudes
    }
}
