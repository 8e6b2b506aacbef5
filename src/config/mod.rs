//! Configuration module for HostProbe
//!
//! Provides CLI arguments and runtime load options.

mod settings;

pub use settings::*;
