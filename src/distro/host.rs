//! Host distribution and architecture detection

use super::codename::ubuntu_version_to_codename;
use super::UBUNTU;
use sysinfo::System;
use tracing::debug;

/// Build a descriptor for the distribution running this process
///
/// Returns `None` when the OS release information is not available
/// (non-Linux hosts, minimal containers without `/etc/os-release`).
pub fn host_descriptor() -> Option<String> {
    let id = System::distribution_id();
    let version = System::os_version();
    debug!("Host release: id={}, version={:?}", id, version);

    descriptor_from_release(&id, version.as_deref()?)
}

/// Build a descriptor from an os-release style id and version
///
/// Ubuntu versions are mapped back to their codename so the result parses
/// the same way a hand-written `ubuntu:<codename>` descriptor does.
pub fn descriptor_from_release(id: &str, version: &str) -> Option<String> {
    let id = id.trim().to_lowercase();
    let version = version.trim();

    if id.is_empty() || version.is_empty() || id.contains(':') || version.contains(':') {
        return None;
    }

    if id == UBUNTU {
        // os_version may carry a point release ("22.04.4")
        let release = version.split('.').take(2).collect::<Vec<_>>().join(".");
        let codename = ubuntu_version_to_codename(&release)?;
        return Some(format!("{}:{}", id, codename));
    }

    Some(format!("{}:{}", id, version))
}

/// Check whether the local architecture is in a list of architectures
///
/// Both Rust (`x86_64`, `aarch64`) and Go/container style names
/// (`amd64`, `arm64`) are accepted.
pub fn compatible_arch<S: AsRef<str>>(list: &[S]) -> bool {
    let local = std::env::consts::ARCH;
    list.iter().any(|arch| normalize_arch(arch.as_ref()) == local)
}

fn normalize_arch(arch: &str) -> &str {
    match arch {
        "amd64" => "x86_64",
        "arm64" => "aarch64",
        "386" | "i386" | "i686" => "x86",
        "ppc64le" => "powerpc64",
        other => other,
    }
}
