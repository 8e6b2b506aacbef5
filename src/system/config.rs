//! System configuration snapshot
//!
//! [`load`] resolves everything a tool needs from the host at startup and
//! returns it as one immutable [`SystemConfig`]. Resolution is fail-fast:
//! the first dependency that cannot be resolved aborts the load, and no
//! partially filled configuration ever reaches the caller.

use super::lookup::{ExecutableResolver, PathResolver, ProcessEnv, ProcessLocator};
use crate::config::LoadOptions;
use crate::error::{HostProbeError, Result};
use crate::network::{self, NetworkInfo};
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the sudo binary looked up on the search path
pub const SUDO_BIN: &str = "sudo";

/// Name of the sed binary looked up on the search path
pub const SED_BIN: &str = "sed";

/// System configuration needed to run experiments on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemConfig {
    host_distro: String,
    bin_path: PathBuf,
    cur_path: PathBuf,
    sed_bin: PathBuf,
    sudo_bin: PathBuf,
    verbose: bool,
    debug: bool,
    network: NetworkInfo,
}

impl SystemConfig {
    /// Linux distribution on the host, as supplied by the caller
    pub fn host_distro(&self) -> &str {
        &self.host_distro
    }

    /// Directory containing the running binary
    pub fn bin_path(&self) -> &Path {
        &self.bin_path
    }

    /// Current working directory at load time
    pub fn cur_path(&self) -> &Path {
        &self.cur_path
    }

    /// Path to the sed binary
    pub fn sed_bin(&self) -> &Path {
        &self.sed_bin
    }

    /// Path to sudo on the host
    pub fn sudo_bin(&self) -> &Path {
        &self.sudo_bin
    }

    /// Verbose mode is active/inactive
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Debug mode is active/inactive
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Details about the network configuration
    pub fn network(&self) -> &NetworkInfo {
        &self.network
    }

    /// Attach the caller's host distro descriptor
    pub fn with_host_distro(mut self, distro: impl Into<String>) -> Self {
        self.host_distro = distro.into();
        self
    }

    /// Attach the caller's verbose/debug flags
    pub fn with_flags(mut self, verbose: bool, debug: bool) -> Self {
        self.verbose = verbose;
        self.debug = debug;
        self
    }

    /// Print the configuration summary to stdout
    pub fn display(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for SystemConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System configuration:")?;
        writeln!(f, "\tPath to the current binary: {}", self.bin_path.display())?;
        writeln!(f, "\tCurrent path: {}", self.cur_path.display())?;
        writeln!(f, "\tPath to the sed binary: {}", self.sed_bin.display())?;
        writeln!(f, "\tPath to the sudo binary: {}", self.sudo_bin.display())?;
        write!(f, "{}", self.network)
    }
}

/// Load the system configuration from the running process and `PATH`
pub fn load(options: &LoadOptions) -> Result<SystemConfig> {
    let resolver = PathResolver::from_options(options);
    load_with(&ProcessEnv, &resolver)
}

/// Load the system configuration through explicit collaborators
pub fn load_with(
    locator: &dyn ProcessLocator,
    resolver: &dyn ExecutableResolver,
) -> Result<SystemConfig> {
    let exe = locator
        .current_exe()
        .map_err(HostProbeError::BinaryPathUnavailable)?;
    let bin_path = exe
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            HostProbeError::BinaryPathUnavailable(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            ))
        })?;

    let cur_path = locator
        .current_dir()
        .map_err(HostProbeError::CurrentDirUnavailable)?;

    let sudo_bin = resolver.resolve(SUDO_BIN)?;
    let sed_bin = resolver.resolve(SED_BIN)?;
    debug!("Dependencies resolved: sudo={}, sed={}", sudo_bin.display(), sed_bin.display());

    let network = network::detect(resolver)?;
    info!("System configuration loaded (network: {})", network.id());

    Ok(SystemConfig {
        host_distro: String::new(),
        bin_path,
        cur_path,
        sed_bin,
        sudo_bin,
        verbose: false,
        debug: false,
        network,
    })
}
