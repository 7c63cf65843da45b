use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MOTION_WINDOW, DEFAULT_OVERRIDE_QBIAS_INTER, DEFAULT_OVERRIDE_QBIAS_INTRA,
    DEFAULT_STABILITY_WINDOW, GENERAL_LIMIT_SHIFT, MAX_MOTION_WINDOW, MAX_STABILITY_WINDOW,
    MIN_MOTION_WINDOW, MIN_STABILITY_WINDOW, SURVEILLANCE_LIMIT_SHIFT,
};
use crate::error::{Result, TuneError};

/// Operator-selected encoding context. Changes the classifier threshold
/// tables and the profile pair that can be selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneMode {
    /// Fixed-camera surveillance.
    #[default]
    Surveillance,
    /// General-purpose content.
    General,
}

impl SceneMode {
    pub fn index(self) -> u32 {
        match self {
            Self::Surveillance => 0,
            Self::General => 1,
        }
    }

    /// Right shift applied to `mb_count * threshold` classifier limits.
    pub fn limit_shift(self) -> u32 {
        match self {
            Self::Surveillance => SURVEILLANCE_LIMIT_SHIFT,
            Self::General => GENERAL_LIMIT_SHIFT,
        }
    }
}

impl std::fmt::Display for SceneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Surveillance => write!(f, "Surveillance"),
            Self::General => write!(f, "General"),
        }
    }
}

/// Operator-supplied quantization bias. Unset or zero components fall back
/// to fixed defaults, never to the profile table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantBiasOverride {
    #[serde(default)]
    pub intra: Option<i32>,
    #[serde(default)]
    pub inter: Option<i32>,
}

impl QuantBiasOverride {
    pub fn new(intra: i32, inter: i32) -> Self {
        Self {
            intra: Some(intra),
            inter: Some(inter),
        }
    }

    /// Resolved (intra, inter) pair. Zero reads as unset.
    pub fn resolve(&self) -> (i32, i32) {
        let pick = |v: Option<i32>, fallback| v.filter(|b| *b != 0).unwrap_or(fallback);
        (
            pick(self.intra, DEFAULT_OVERRIDE_QBIAS_INTRA),
            pick(self.inter, DEFAULT_OVERRIDE_QBIAS_INTER),
        )
    }
}

/// Per-session tuning configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneConfig {
    #[serde(default)]
    pub scene_mode: SceneMode,
    /// Pin every frame to the quality-priority profile.
    #[serde(default)]
    pub quality_priority: bool,
    /// Leave the adaptive filter (ATF) weights untouched.
    #[serde(default)]
    pub suppress_adaptive_filter: bool,
    /// Explicit quantization bias replacing the profile's pair.
    #[serde(default)]
    pub qbias: Option<QuantBiasOverride>,
    /// Length of the classified motion level window.
    #[serde(default = "default_motion_window")]
    pub motion_window: usize,
    /// Length of the smoothed flag window.
    #[serde(default = "default_stability_window")]
    pub stability_window: usize,
    /// Allocate auxiliary QP/motion maps for deblurring.
    #[serde(default)]
    pub deblur: bool,
}

fn default_motion_window() -> usize {
    DEFAULT_MOTION_WINDOW
}
fn default_stability_window() -> usize {
    DEFAULT_STABILITY_WINDOW
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            scene_mode: SceneMode::default(),
            quality_priority: false,
            suppress_adaptive_filter: false,
            qbias: None,
            motion_window: DEFAULT_MOTION_WINDOW,
            stability_window: DEFAULT_STABILITY_WINDOW,
            deblur: false,
        }
    }
}

impl TuneConfig {
    /// Reject window lengths the classifier is not defined for.
    pub fn validate(&self) -> Result<()> {
        check_window(
            "motion_window",
            self.motion_window,
            MIN_MOTION_WINDOW,
            MAX_MOTION_WINDOW,
        )?;
        check_window(
            "stability_window",
            self.stability_window,
            MIN_STABILITY_WINDOW,
            MAX_STABILITY_WINDOW,
        )?;
        if let Some(bias) = self.qbias {
            let (intra, inter) = bias.resolve();
            if intra < 0 || inter < 0 {
                return Err(TuneError::InvalidConfig(format!(
                    "quantization bias must be non-negative, got intra={intra} inter={inter}"
                )));
            }
        }
        Ok(())
    }
}

fn check_window(name: &'static str, len: usize, min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(TuneError::InvalidWindow {
            name,
            len,
            min,
            max,
        })
    }
}
