use scenetune_core::classify::stability::smooth;
use scenetune_core::classify::SceneStabilityTracker;
use scenetune_core::history::Window;

/// Build a raw flag window from newest-first values.
fn prior(flags: [bool; 4]) -> Window<bool> {
    let mut w = Window::filled(4, false);
    for &f in flags.iter().rev() {
        w.push(f);
    }
    w
}

#[test]
fn test_prior_helper_is_newest_first() {
    assert_eq!(prior([true, false, false, true]).to_vec(), vec![true, false, false, true]);
}

#[test]
fn test_three_recent_flags_confirm_motion() {
    for raw in [false, true] {
        assert!(smooth(&prior([true, true, true, false]), raw));
        assert!(smooth(&prior([true, true, true, true]), raw));
    }
}

#[test]
fn test_two_recent_flags_follow_raw() {
    assert!(smooth(&prior([true, true, false, false]), true));
    assert!(!smooth(&prior([true, true, false, false]), false));
}

#[test]
fn test_older_run_of_three_follows_raw() {
    assert!(smooth(&prior([false, true, true, true]), true));
    assert!(!smooth(&prior([false, true, true, true]), false));
}

#[test]
fn test_broken_runs_are_still() {
    for raw in [false, true] {
        assert!(!smooth(&prior([false; 4]), raw));
        assert!(!smooth(&prior([true, false, true, true]), raw));
        assert!(!smooth(&prior([false, true, true, false]), raw));
        assert!(!smooth(&prior([true, false, false, false]), raw));
    }
}

#[test]
fn test_tracker_needs_a_run_before_reporting_motion() {
    let mut t = SceneStabilityTracker::new(5);
    let smoothed: Vec<bool> = (0..5).map(|_| t.observe(true)).collect();
    assert_eq!(smoothed, vec![false, false, true, true, true]);
    assert!(t.current());
}

#[test]
fn test_tracker_holds_motion_over_a_single_still_frame() {
    let mut t = SceneStabilityTracker::new(5);
    for _ in 0..4 {
        t.observe(true);
    }
    assert_eq!(t.raw_flags().to_vec(), vec![true; 4]);
    assert!(t.observe(false));
}

#[test]
fn test_tracker_decays_after_still_frames() {
    let mut t = SceneStabilityTracker::new(5);
    for _ in 0..4 {
        t.observe(true);
    }
    t.observe(false);
    // prior [f, t, t, t] -> follows raw
    assert!(!t.observe(false));
    assert!(!t.observe(true));
}

#[test]
fn test_tracker_records_both_windows() {
    let mut t = SceneStabilityTracker::new(6);
    for _ in 0..10 {
        t.observe(true);
        assert_eq!(t.raw_flags().len(), 4);
        assert_eq!(t.smoothed_flags().len(), 6);
    }
    assert_eq!(t.smoothed_flags()[0], t.current());
}
