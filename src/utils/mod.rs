//! Utility modules: build info, logging, config file location.

pub mod build_info;
pub mod logging;
pub mod persistence;

pub use build_info::*;
