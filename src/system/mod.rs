//! Host configuration assembly
//!
//! Locates the running binary and required external tools, detects the
//! network fabric, and assembles the immutable [`SystemConfig`] snapshot.

mod config;
mod lookup;

pub use config::{load, load_with, SystemConfig, SED_BIN, SUDO_BIN};
pub use lookup::{ExecutableResolver, PathResolver, ProcessEnv, ProcessLocator};

#[cfg(test)]
pub(crate) use lookup::testing;
