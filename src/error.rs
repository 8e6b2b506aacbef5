//! Error types for HostProbe
//!
//! This module defines the error type shared by the detection and
//! configuration-assembly code. Errors fall into three kinds that callers
//! are expected to tell apart:
//!
//! - **Recoverable**: a dependency could not be resolved; the caller decides
//!   how to react.
//! - **Fatal**: the host cannot provide even a default network
//!   configuration; the process should not continue.
//! - **Not implemented**: a capability that is deliberately stubbed out.

use std::time::Duration;
use thiserror::Error;

/// Main error type for HostProbe operations
#[derive(Error, Debug)]
pub enum HostProbeError {
    /// The location of the running binary could not be determined
    #[error("cannot detect the directory of the binary: {0}")]
    BinaryPathUnavailable(#[source] std::io::Error),

    /// The current working directory could not be read
    #[error("cannot detect current directory: {0}")]
    CurrentDirUnavailable(#[source] std::io::Error),

    /// A required external binary is not on the search path
    #[error("{name} not available: {reason}")]
    MissingDependency {
        /// Command that was looked up
        name: String,
        /// Why the lookup failed
        reason: String,
    },

    /// An executable lookup did not finish within its time bound
    #[error("lookup of '{name}' timed out after {timeout:?}")]
    LookupTimeout {
        /// Command that was looked up
        name: String,
        /// Bound that was exceeded
        timeout: Duration,
    },

    /// Not even the default network configuration could be loaded
    #[error("unable to find a default network configuration")]
    NoDefaultNetwork,

    /// Capability that exists in the API but has no implementation
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// I/O error outside of path resolution
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostProbeError {
    /// Create a missing-dependency error
    pub fn missing(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::MissingDependency {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a lookup timeout error
    pub fn timeout(name: impl Into<String>, timeout: Duration) -> Self {
        Self::LookupTimeout {
            name: name.into(),
            timeout,
        }
    }

    /// Create a not-implemented error
    pub fn not_implemented(feature: impl Into<String>) -> Self {
        Self::NotImplemented(feature.into())
    }

    /// Check if the process cannot reasonably continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoDefaultNetwork)
    }

    /// Check if the caller may react to this error and carry on
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal() && !self.is_not_implemented()
    }

    /// Check if this error comes from a deliberately stubbed capability
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }

    /// Name of the external dependency that failed to resolve, if any
    pub fn dependency(&self) -> Option<&str> {
        match self {
            Self::MissingDependency { name, .. } | Self::LookupTimeout { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Result type alias for HostProbe operations
pub type Result<T> = std::result::Result<T, HostProbeError>;
