use crate::consts::MOTION_FLAG_WINDOW;
use crate::history::Window;

/// Smooths raw per-frame motion flags into the scene motion flag.
#[derive(Clone, Debug)]
pub struct SceneStabilityTracker {
    raw_flags: Window<bool>,
    smoothed_flags: Window<bool>,
    current: bool,
}

impl SceneStabilityTracker {
    pub fn new(stability_window: usize) -> Self {
        Self {
            raw_flags: Window::filled(MOTION_FLAG_WINDOW, false),
            smoothed_flags: Window::filled(stability_window, false),
            current: false,
        }
    }

    /// Decide the smoothed flag from the prior raw window, then record both.
    pub fn observe(&mut self, raw_flag: bool) -> bool {
        let smoothed = smooth(&self.raw_flags, raw_flag);
        self.raw_flags.push(raw_flag);
        self.smoothed_flags.push(smoothed);
        self.current = smoothed;
        smoothed
    }

    /// Smoothed flag of the last completed frame.
    pub fn current(&self) -> bool {
        self.current
    }

    /// Raw flags, newest first.
    pub fn raw_flags(&self) -> &Window<bool> {
        &self.raw_flags
    }

    /// Smoothed flags, newest first.
    pub fn smoothed_flags(&self) -> &Window<bool> {
        &self.smoothed_flags
    }
}

/// Three consecutive raw flags confirm motion; a partial run defers to the
/// current raw flag; anything else is still.
pub fn smooth(prior: &Window<bool>, raw_flag: bool) -> bool {
    let f = |age: usize| prior.get(age).copied().unwrap_or(false);

    if f(0) && f(1) && f(2) {
        true
    } else if (f(0) && f(1)) || (f(1) && f(2) && f(3)) {
        raw_flag
    } else {
        false
    }
}
