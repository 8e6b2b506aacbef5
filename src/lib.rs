//! # HostProbe - Host Environment Detection for HPC Tooling
//!
//! HostProbe inspects the host a tool is about to run on and assembles a
//! single immutable configuration snapshot at startup.
//!
//! ## Features
//!
//! - **Distribution Identification**: Parse `name:version` descriptors,
//!   with Ubuntu codenames mapped to release versions
//! - **Network Fabric Detection**: Infiniband when present, default
//!   networking otherwise
//! - **Dependency Resolution**: Fail-fast lookup of required binaries
//!   (`sudo`, `sed`) with a bounded wait per lookup
//!
//! ## Quick Start
//!
//! ```no_run
//! use hostprobe::config::LoadOptions;
//! use hostprobe::system;
//!
//! let config = system::load(&LoadOptions::default())
//!     .unwrap()
//!     .with_host_distro("centos:7");
//!
//! config.display();
//! ```
//!
//! ## Distro Descriptors
//!
//! ```
//! use hostprobe::distro::parse_descriptor;
//!
//! let id = parse_descriptor("ubuntu:disco");
//! assert_eq!(id.version, "19.04");
//!
//! let id = parse_descriptor("centos:6");
//! assert_eq!(id.version, "6");
//! assert!(id.codename.is_empty());
//! ```
//!
//! ## Network Detection
//!
//! ```no_run
//! use hostprobe::network;
//! use hostprobe::system::PathResolver;
//!
//! let info = network::detect(&PathResolver::default()).unwrap();
//! println!("Fabric: {}", info.id());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod distro;
pub mod error;
pub mod network;
pub mod system;

// Re-export commonly used types
pub use config::LoadOptions;
pub use distro::{parse_descriptor, DistroId};
pub use error::{HostProbeError, Result};
pub use network::{Fabric, NetworkInfo};
pub use system::{load, SystemConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use hostprobe::prelude::*;
    //! ```

    pub use crate::config::LoadOptions;
    pub use crate::distro::{parse_descriptor, DistroId};
    pub use crate::error::{HostProbeError, Result};
    pub use crate::network::{detect, Fabric, FabricComponent, NetworkInfo};
    pub use crate::system::{load, ExecutableResolver, PathResolver, SystemConfig};
}
