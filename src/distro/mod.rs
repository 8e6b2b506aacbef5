//! Linux distribution identification
//!
//! Distributions are named by a descriptor string of the form
//! `<name>:<version>` (e.g., `centos:7`). Ubuntu is the exception: it is
//! keyed by codename (`ubuntu:jammy`) and the version is derived.
//!
//! Parsing never fails. Input that does not have exactly two segments
//! yields an empty [`DistroId`], and an unknown Ubuntu codename yields an
//! empty version. Callers treat either case as "unknown".

mod codename;
mod host;

pub use codename::{ubuntu_codename_to_version, ubuntu_version_to_codename};
pub use host::{compatible_arch, descriptor_from_release, host_descriptor};

use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Distribution family keyed by codename instead of version
pub const UBUNTU: &str = "ubuntu";

/// Identity of a Linux distribution
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DistroId {
    /// Name of the distribution, e.g., ubuntu
    pub name: String,
    /// Version of the distribution, e.g., 7, 19.04
    pub version: String,
    /// Codename of the distribution, e.g., disco (can be empty)
    pub codename: String,
}

impl DistroId {
    /// Parse a descriptor such as `centos:6` or `ubuntu:disco`
    pub fn parse(descr: &str) -> Self {
        parse_descriptor(descr)
    }

    /// Identity of the distribution running this process
    pub fn detect_host() -> Self {
        host_descriptor()
            .map(|descr| parse_descriptor(&descr))
            .unwrap_or_default()
    }

    /// True when the descriptor could not be parsed
    pub fn is_unknown(&self) -> bool {
        self.name.is_empty()
    }

    /// True when the version is known
    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }

    /// Format back into descriptor form (`name:codename` for Ubuntu)
    pub fn descriptor(&self) -> String {
        if self.name == UBUNTU {
            format!("{}:{}", self.name, self.codename)
        } else {
            format!("{}:{}", self.name, self.version)
        }
    }
}

impl fmt::Display for DistroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "unknown");
        }
        write!(f, "{} {}", self.name, self.version)?;
        if !self.codename.is_empty() {
            write!(f, " ({})", self.codename)?;
        }
        Ok(())
    }
}

/// Parse the descriptor string of a Linux distribution (e.g., `centos:6`)
pub fn parse_descriptor(descr: &str) -> DistroId {
    let tokens: Vec<&str> = descr.split(':').collect();
    let [name, key] = tokens.as_slice() else {
        return DistroId::default();
    };

    if *name == UBUNTU {
        DistroId {
            name: (*name).to_string(),
            version: ubuntu_codename_to_version(key),
            codename: (*key).to_string(),
        }
    } else {
        DistroId {
            name: (*name).to_string(),
            version: (*key).to_string(),
            codename: String::new(),
        }
    }
}

/// Split a descriptor into its raw name and version/codename segments
///
/// Unlike [`parse_descriptor`], no codename lookup happens here.
pub fn split_descriptor(descr: &str) -> Option<(String, String)> {
    match descr.split_once(':') {
        Some((name, key)) if !key.contains(':') => Some((name.to_string(), key.to_string())),
        _ => {
            warn!("{} is an invalid distro ID", descr);
            None
        }
    }
}

/// Descriptor in a form usable for directory and file names (`centos_7`)
pub fn descriptor_slug(descr: &str) -> String {
    descr.replacen(':', "_", 1)
}
