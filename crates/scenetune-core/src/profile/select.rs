use crate::config::SceneMode;
use crate::error::Result;

use super::table::ProfileIndex;

/// `scene_mode * 2 + motion`, before range checking.
pub fn raw_profile_index(scene_mode: SceneMode, motion_flag: bool) -> u32 {
    scene_mode.index() * 2 + u32::from(motion_flag)
}

/// Pick the profile for the next frame.
///
/// Quality priority pins the result to [`ProfileIndex::GeneralMotion`]
/// whatever the classifier decided.
pub fn select_profile(
    scene_mode: SceneMode,
    motion_flag: bool,
    quality_priority: bool,
) -> Result<ProfileIndex> {
    if quality_priority {
        return Ok(ProfileIndex::GeneralMotion);
    }
    ProfileIndex::try_from(raw_profile_index(scene_mode, motion_flag))
}
