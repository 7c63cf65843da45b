pub mod aux_maps;
pub mod classify;
pub mod config;
pub mod consts;
pub mod error;
pub mod feedback;
pub mod history;
pub mod profile;
pub mod session;
pub mod sink;
