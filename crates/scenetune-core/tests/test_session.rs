mod common;

use std::io::Write;
use std::sync::Arc;

use scenetune_core::aux_maps::{AuxMap, AuxMapSizes, HeapAllocator};
use scenetune_core::classify::MotionLevel;
use scenetune_core::config::{SceneMode, TuneConfig};
use scenetune_core::error::TuneError;
use scenetune_core::feedback::{FrameFeedback, Trace};
use scenetune_core::profile::{ProfileIndex, ProfileTable};
use scenetune_core::session::{FrameReport, TuneSession};
use scenetune_core::sink::{ConfigSink, Field, RecordingSink};

use common::{empty_frame, large_frame, still_frame};

fn session() -> TuneSession {
    TuneSession::with_builtin_profiles(TuneConfig::default()).unwrap()
}

fn replay(
    session: &mut TuneSession,
    frames: &[FrameFeedback],
) -> (Vec<FrameReport>, RecordingSink) {
    let mut sink = RecordingSink::new();
    let reports = frames
        .iter()
        .map(|f| session.process_frame(f, &mut sink))
        .collect();
    (reports, sink)
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_new_session_rejects_short_window() {
    let config = TuneConfig {
        motion_window: 2,
        ..Default::default()
    };
    let err = TuneSession::with_builtin_profiles(config).unwrap_err();
    assert!(matches!(
        err,
        TuneError::InvalidWindow {
            name: "motion_window",
            len: 2,
            min: 3,
            max: 64
        }
    ));
}

#[test]
fn test_new_session_state() {
    let s = session();
    let state = s.state();
    assert_eq!(state.frames_observed(), 0);
    assert!(!state.current_motion_flag());
    assert_eq!(state.scene_mode(), SceneMode::Surveillance);
    assert_eq!(state.motion_level_history().len(), 5);
    assert!(state
        .motion_level_history()
        .iter()
        .all(|l| *l == MotionLevel::Still));
    assert_eq!(state.motion_flag_history().len(), 4);
    assert_eq!(state.scene_stability_history().len(), 5);
    assert_eq!(state.previous_motion_magnitude().to_vec(), vec![None, None]);
}

#[test]
fn test_sessions_share_profile_table() {
    let table = Arc::new(ProfileTable::builtin());
    let a = TuneSession::new(TuneConfig::default(), Arc::clone(&table)).unwrap();
    let b = TuneSession::new(TuneConfig::default(), Arc::clone(&table)).unwrap();
    assert!(Arc::ptr_eq(a.table(), b.table()));
    assert_eq!(Arc::strong_count(&table), 3);
}

// ---------------------------------------------------------------------------
// Frame sequences
// ---------------------------------------------------------------------------

#[test]
fn test_frames_without_statistics_stay_still() {
    let mut s = session();
    let frames = vec![empty_frame(); 10];
    let (reports, sink) = replay(&mut s, &frames);

    for (i, r) in reports.iter().enumerate() {
        assert_eq!(r.frame, i as u64);
        assert_eq!(r.analysis.motion.verdict.level, MotionLevel::Unknown);
        assert!(!r.analysis.motion_flag);
        assert_eq!(r.analysis.rate_control.motion_level, 0);
        assert_eq!(r.analysis.rate_control.complex_level, 0);
        assert_eq!(r.profile, Some(ProfileIndex::SurveillanceStill));
    }
    assert_eq!(s.state().frames_observed(), 10);
    assert_eq!(sink.scalar(Field::ChromaKlutOffset), Some(3));
}

#[test]
fn test_sustained_motion_switches_profile() {
    let mut s = session();
    let frames = vec![large_frame(); 6];
    let (reports, sink) = replay(&mut s, &frames);

    let flags: Vec<bool> = reports.iter().map(|r| r.analysis.motion_flag).collect();
    assert_eq!(flags, [false, false, false, true, true, true]);
    assert_eq!(reports[2].profile, Some(ProfileIndex::SurveillanceStill));
    assert_eq!(reports[3].profile, Some(ProfileIndex::SurveillanceMotion));
    assert_eq!(sink.scalar(Field::MoveLambda), Some(8));
    assert_eq!(sink.scalar(Field::CimePmvSetZero), Some(0));
}

#[test]
fn test_single_still_frame_does_not_end_motion() {
    let mut s = session();
    let mut frames = vec![large_frame(); 5];
    frames.push(still_frame());
    let (reports, _) = replay(&mut s, &frames);

    let last = reports.last().unwrap();
    assert_eq!(last.analysis.motion.verdict.level, MotionLevel::Still);
    assert!(last.analysis.motion_flag);
    assert_eq!(last.profile, Some(ProfileIndex::SurveillanceMotion));
}

#[test]
fn test_unknown_frame_still_advances_flags() {
    let mut s = session();
    replay(&mut s, &[large_frame(), large_frame()]);
    let levels_before = s.state().motion_level_history().clone();
    assert_eq!(
        s.state().motion_flag_history().to_vec(),
        vec![true, false, false, false]
    );

    let analysis = s.update_statistics(&empty_frame());

    assert_eq!(analysis.motion.verdict.level, MotionLevel::Unknown);
    assert_eq!(analysis.motion.threshold, 28);
    assert!(analysis.motion.raw_flag);
    assert_eq!(s.state().motion_level_history(), &levels_before);
    assert_eq!(
        s.state().motion_flag_history().to_vec(),
        vec![true, true, false, false]
    );
}

#[test]
fn test_quality_priority_ignores_scene() {
    let config = TuneConfig {
        quality_priority: true,
        ..Default::default()
    };
    let mut s = TuneSession::with_builtin_profiles(config).unwrap();
    let frames = [still_frame(), large_frame(), empty_frame(), large_frame()];
    let (reports, sink) = replay(&mut s, &frames);

    assert!(reports
        .iter()
        .all(|r| r.profile == Some(ProfileIndex::GeneralMotion)));
    assert_eq!(sink.scalar(Field::RdoSegmentEn), Some(0));
}

#[test]
fn test_general_mode_selects_general_profiles() {
    let mut s = session();
    s.set_scene_mode(SceneMode::General);
    assert_eq!(s.config().scene_mode, SceneMode::General);
    assert_eq!(s.select_profile().unwrap(), ProfileIndex::GeneralStill);

    let (reports, _) = replay(&mut s, &vec![large_frame(); 4]);
    assert_eq!(reports[3].profile, Some(ProfileIndex::GeneralMotion));
}

#[test]
fn test_scene_mode_change_keeps_history() {
    let mut s = session();
    replay(&mut s, &vec![large_frame(); 4]);
    s.set_scene_mode(SceneMode::General);

    assert!(s.state().current_motion_flag());
    assert_eq!(s.select_profile().unwrap(), ProfileIndex::GeneralMotion);
}

#[test]
fn test_window_lengths_never_change() {
    let mut s = session();
    let frames = [
        large_frame(),
        empty_frame(),
        still_frame(),
        large_frame(),
        empty_frame(),
        large_frame(),
        large_frame(),
        still_frame(),
    ];
    for f in &frames {
        s.update_statistics(f);
        let state = s.state();
        assert_eq!(state.motion_level_history().len(), 5);
        assert_eq!(state.motion_flag_history().len(), 4);
        assert_eq!(state.scene_stability_history().len(), 5);
        assert_eq!(state.previous_motion_magnitude().len(), 2);
        assert_eq!(state.previous_texture_magnitude().len(), 2);
    }
}

#[test]
fn test_replay_is_deterministic() {
    let frames = [
        large_frame(),
        still_frame(),
        large_frame(),
        large_frame(),
        empty_frame(),
        large_frame(),
        still_frame(),
    ];
    let (reports_a, sink_a) = replay(&mut session(), &frames);
    let (reports_b, sink_b) = replay(&mut session(), &frames);
    assert_eq!(reports_a, reports_b);
    assert_eq!(sink_a, sink_b);
}

#[test]
fn test_suppressed_atf_session_leaves_filter_untouched() {
    let config = TuneConfig {
        suppress_adaptive_filter: true,
        ..Default::default()
    };
    let mut s = TuneSession::with_builtin_profiles(config).unwrap();
    let (_, sink) = replay(&mut s, &[large_frame()]);
    for field in Field::ADAPTIVE_FILTER {
        assert!(!sink.contains(field));
    }
    assert!(sink.contains(Field::CimeMulti));
}

// ---------------------------------------------------------------------------
// Auxiliary maps
// ---------------------------------------------------------------------------

#[test]
fn test_aux_maps_disabled() {
    let s = session();
    let mut alloc = HeapAllocator::new();
    assert_eq!(s.prepare_aux_maps(1920, 1080, &mut alloc).unwrap(), None);
    assert!(alloc.buffer(AuxMap::MotionFlag).is_none());
}

#[test]
fn test_aux_maps_sized_per_ctu() {
    let config = TuneConfig {
        deblur: true,
        ..Default::default()
    };
    let s = TuneSession::with_builtin_profiles(config).unwrap();
    let mut alloc = HeapAllocator::new();
    let sizes = s.prepare_aux_maps(1920, 1080, &mut alloc).unwrap().unwrap();

    assert_eq!(
        sizes,
        AuxMapSizes {
            ctu_count: 510,
            qpmap_base_cfg: 32640,
            qpmap_qp_cfg: 97920,
            motion_flag: 8160,
        }
    );
    for map in AuxMap::ALL {
        let buf = alloc.buffer(map).unwrap();
        assert_eq!(buf.len(), sizes.size_of(map));
        assert!(buf.iter().all(|b| *b == 0));
    }
}

#[test]
fn test_aux_maps_grow_with_geometry() {
    let config = TuneConfig {
        deblur: true,
        ..Default::default()
    };
    let s = TuneSession::with_builtin_profiles(config).unwrap();
    let mut alloc = HeapAllocator::new();

    // 10x8 CTUs
    let small = s.prepare_aux_maps(640, 480, &mut alloc).unwrap().unwrap();
    assert_eq!(alloc.buffer(AuxMap::MotionFlag).unwrap().len(), 80 * 16);

    let large = s.prepare_aux_maps(1920, 1080, &mut alloc).unwrap().unwrap();
    assert!(large.ctu_count > small.ctu_count);
    for map in AuxMap::ALL {
        assert_eq!(alloc.buffer(map).unwrap().len(), large.size_of(map));
    }
}

#[test]
fn test_aux_maps_kept_when_large_enough() {
    let config = TuneConfig {
        deblur: true,
        ..Default::default()
    };
    let s = TuneSession::with_builtin_profiles(config).unwrap();
    let mut alloc = HeapAllocator::new();
    let large = s.prepare_aux_maps(1920, 1080, &mut alloc).unwrap().unwrap();
    let small = s.prepare_aux_maps(640, 480, &mut alloc).unwrap().unwrap();

    for map in AuxMap::ALL {
        let len = alloc.buffer(map).unwrap().len();
        assert_eq!(len, large.size_of(map));
        assert!(len >= small.size_of(map));
    }
}

// ---------------------------------------------------------------------------
// Traces
// ---------------------------------------------------------------------------

#[test]
fn test_trace_file_replay() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[frames]]
width = 512
height = 512
mb_count = 1000
madp = 1000

[[frames.tiles]]
motion = [0, 0, 0, 600]

[[frames.tiles]]
motion = [0, 0, 0, 400]
texture = [0, 0, 0, 100]

[[frames]]
width = 512
height = 512
"#
    )
    .unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let trace: Trace = toml::from_str(&text).unwrap();
    assert_eq!(trace.frames.len(), 2);
    assert_eq!(trace.frames[0].totals().motion, [0, 0, 0, 1000]);
    assert_eq!(trace.frames[1].tile_count(), 0);

    let (reports, _) = replay(&mut session(), &trace.frames);
    assert_eq!(reports[0].analysis.motion.verdict.level, MotionLevel::Large);
    assert_eq!(reports[0].analysis.rate_control.motion_level, 200);
    assert_eq!(reports[1].analysis.motion.verdict.level, MotionLevel::Unknown);
}

#[test]
fn test_frame_report_serializes() {
    let mut s = session();
    let mut sink = RecordingSink::new();
    let report = s.process_frame(&large_frame(), &mut sink);

    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["frame"], 0);
    assert_eq!(json["profile"], "SurveillanceStill");
    assert_eq!(json["analysis"]["motion"]["verdict"]["level"], "Large");
    assert_eq!(json["analysis"]["totals"]["motion"][3], 1000);
}

#[test]
fn test_apply_profile_through_dyn_sink() {
    let s = session();
    let mut recording = RecordingSink::new();
    let sink: &mut dyn ConfigSink = &mut recording;
    assert_eq!(s.apply_profile(sink).unwrap(), ProfileIndex::SurveillanceStill);
    assert_eq!(recording.scalar(Field::QntBiasP), Some(60));
}
