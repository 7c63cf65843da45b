pub mod apply;
pub mod select;
pub mod table;

pub use apply::{apply_profile, ApplyOptions};
pub use select::{raw_profile_index, select_profile};
pub use table::{ProfileIndex, ProfileTable, TuningProfile};
