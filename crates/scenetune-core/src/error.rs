use thiserror::Error;

use crate::aux_maps::AuxMap;

#[derive(Error, Debug)]
pub enum TuneError {
    #[error("Profile index {index} out of range (expected 0..=3)")]
    ProfileIndexOutOfRange { index: u32 },

    #[error("Window '{name}' has length {len}, expected {min}..={max}")]
    InvalidWindow {
        name: &'static str,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to allocate {size} bytes for {map}")]
    Allocation { map: AuxMap, size: usize },
}

pub type Result<T> = std::result::Result<T, TuneError>;
