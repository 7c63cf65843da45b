//! Per-session tuning state and the frame-by-frame driver.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::aux_maps::{prepare_aux_maps, AuxMapSizes, BufferAllocator};
use crate::classify::{
    classify_complexity, MotionDecision, MotionLevel, MotionLevelClassifier, RateControlHints,
    SceneStabilityTracker,
};
use crate::config::{SceneMode, TuneConfig};
use crate::error::Result;
use crate::feedback::{FrameFeedback, FrameTotals};
use crate::history::Window;
use crate::profile::{apply_profile, select_profile, ApplyOptions, ProfileIndex, ProfileTable};
use crate::sink::ConfigSink;

/// History carried between frames of one encode session.
#[derive(Clone, Debug)]
pub struct TuneState {
    scene_mode: SceneMode,
    classifier: MotionLevelClassifier,
    tracker: SceneStabilityTracker,
    frames_observed: u64,
}

impl TuneState {
    pub fn new(config: &TuneConfig) -> Self {
        Self {
            scene_mode: config.scene_mode,
            classifier: MotionLevelClassifier::new(config.motion_window),
            tracker: SceneStabilityTracker::new(config.stability_window),
            frames_observed: 0,
        }
    }

    pub fn scene_mode(&self) -> SceneMode {
        self.scene_mode
    }

    /// Smoothed motion flag of the last completed frame.
    pub fn current_motion_flag(&self) -> bool {
        self.tracker.current()
    }

    pub fn motion_level_history(&self) -> &Window<MotionLevel> {
        self.classifier.levels()
    }

    pub fn motion_flag_history(&self) -> &Window<bool> {
        self.tracker.raw_flags()
    }

    pub fn scene_stability_history(&self) -> &Window<bool> {
        self.tracker.smoothed_flags()
    }

    pub fn previous_motion_magnitude(&self) -> &Window<Option<u32>> {
        self.classifier.motion_magnitudes()
    }

    pub fn previous_texture_magnitude(&self) -> &Window<Option<u32>> {
        self.classifier.texture_magnitudes()
    }

    pub fn frames_observed(&self) -> u64 {
        self.frames_observed
    }
}

/// Everything derived from one frame's statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FrameAnalysis {
    pub totals: FrameTotals,
    pub motion: MotionDecision,
    /// Smoothed scene motion flag after this frame.
    pub motion_flag: bool,
    pub rate_control: RateControlHints,
}

/// Result of [`TuneSession::process_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Zero-based frame number within the session.
    pub frame: u64,
    pub analysis: FrameAnalysis,
    /// Applied profile, `None` if application was skipped.
    pub profile: Option<ProfileIndex>,
}

/// One encode session: owns its [`TuneState`] and shares the profile table.
#[derive(Clone, Debug)]
pub struct TuneSession {
    config: TuneConfig,
    table: Arc<ProfileTable>,
    state: TuneState,
}

impl TuneSession {
    pub fn new(config: TuneConfig, table: Arc<ProfileTable>) -> Result<Self> {
        config.validate()?;
        let state = TuneState::new(&config);
        info!(
            scene_mode = %config.scene_mode,
            motion_window = config.motion_window,
            quality_priority = config.quality_priority,
            "Tuning session created"
        );
        Ok(Self {
            config,
            table,
            state,
        })
    }

    /// Session backed by the built-in profile table.
    pub fn with_builtin_profiles(config: TuneConfig) -> Result<Self> {
        Self::new(config, Arc::new(ProfileTable::builtin()))
    }

    pub fn config(&self) -> &TuneConfig {
        &self.config
    }

    pub fn table(&self) -> &Arc<ProfileTable> {
        &self.table
    }

    pub fn state(&self) -> &TuneState {
        &self.state
    }

    /// Switch scene mode on reconfiguration. History is kept.
    pub fn set_scene_mode(&mut self, scene_mode: SceneMode) {
        if self.state.scene_mode != scene_mode {
            info!(from = %self.state.scene_mode, to = %scene_mode, "Scene mode changed");
        }
        self.config.scene_mode = scene_mode;
        self.state.scene_mode = scene_mode;
    }

    /// Fold one completed frame's statistics into the session.
    pub fn update_statistics(&mut self, feedback: &FrameFeedback) -> FrameAnalysis {
        let totals = feedback.totals();
        let motion = self
            .state
            .classifier
            .observe(feedback, &totals, self.state.scene_mode);
        let motion_flag = self.state.tracker.observe(motion.raw_flag);
        let rate_control = classify_complexity(&totals, feedback.macroblocks());
        self.state.frames_observed += 1;

        debug!(
            frame = self.state.frames_observed,
            tiles = feedback.tile_count(),
            level = %motion.verdict.level,
            raw_flag = motion.raw_flag,
            motion_flag,
            motion_level = rate_control.motion_level,
            complex_level = rate_control.complex_level,
            "Frame statistics updated"
        );

        FrameAnalysis {
            totals,
            motion,
            motion_flag,
            rate_control,
        }
    }

    /// Profile the next frame would use.
    pub fn select_profile(&self) -> Result<ProfileIndex> {
        select_profile(
            self.state.scene_mode,
            self.state.current_motion_flag(),
            self.config.quality_priority,
        )
    }

    /// Apply the selected profile to `sink`. Nothing is written on error.
    pub fn apply_profile<S: ConfigSink + ?Sized>(&self, sink: &mut S) -> Result<ProfileIndex> {
        let index = self.select_profile().inspect_err(|e| {
            error!(error = %e, "Invalid tuning profile, skipping frame");
        })?;
        let options = ApplyOptions::from_config(&self.config, self.state.current_motion_flag());
        apply_profile(&self.table, index, &options, sink);
        debug!(profile = %index, "Tuning profile applied");
        Ok(index)
    }

    /// Update statistics then configure the next frame.
    ///
    /// A failed application is logged and reported as `profile: None`; the
    /// session stays usable for later frames.
    pub fn process_frame<S: ConfigSink + ?Sized>(
        &mut self,
        feedback: &FrameFeedback,
        sink: &mut S,
    ) -> FrameReport {
        let frame = self.state.frames_observed;
        let analysis = self.update_statistics(feedback);
        let profile = self.apply_profile(sink).ok();
        FrameReport {
            frame,
            analysis,
            profile,
        }
    }

    /// Allocate deblurring maps if the session has deblurring enabled.
    pub fn prepare_aux_maps<A: BufferAllocator + ?Sized>(
        &self,
        width: u32,
        height: u32,
        allocator: &mut A,
    ) -> Result<Option<AuxMapSizes>> {
        prepare_aux_maps(self.config.deblur, width, height, allocator)
    }
}
