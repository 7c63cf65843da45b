pub mod complexity;
pub mod motion;
pub mod stability;
pub mod thresholds;

pub use complexity::{classify_complexity, RateControlHints};
pub use motion::{MotionDecision, MotionLevel, MotionLevelClassifier, MotionVerdict};
pub use stability::SceneStabilityTracker;
