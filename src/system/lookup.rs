//! Executable resolution and process self-location
//!
//! Every lookup on the search path runs on a helper thread and is awaited
//! for at most the configured timeout. A lookup that never returns (hung
//! automounter, stale NFS entry in `PATH`) surfaces as
//! [`HostProbeError::LookupTimeout`] instead of blocking startup. The
//! helper thread is detached on timeout and finishes on its own.

use crate::config::LoadOptions;
use crate::error::{HostProbeError, Result};
use crossbeam::channel::{self, RecvTimeoutError};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Resolves a command name to the absolute path of an executable
pub trait ExecutableResolver {
    /// Find `name` on the search path
    fn resolve(&self, name: &str) -> Result<PathBuf>;
}

/// Locates the running process on the filesystem
pub trait ProcessLocator {
    /// Path of the running binary
    fn current_exe(&self) -> io::Result<PathBuf>;
    /// Current working directory
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// [`ProcessLocator`] backed by the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessLocator for ProcessEnv {
    fn current_exe(&self) -> io::Result<PathBuf> {
        std::env::current_exe()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// [`ExecutableResolver`] searching `PATH` (or a fixed search path)
#[derive(Debug, Clone)]
pub struct PathResolver {
    search_path: Option<OsString>,
    timeout: Duration,
}

impl PathResolver {
    /// Resolver over the process `PATH`
    pub fn new(timeout: Duration) -> Self {
        Self {
            search_path: None,
            timeout,
        }
    }

    /// Resolver built from load options
    pub fn from_options(options: &LoadOptions) -> Self {
        Self {
            search_path: options.search_path.clone(),
            timeout: options.lookup_timeout,
        }
    }

    /// Restrict lookups to the given search path
    pub fn with_search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }

    /// Time bound applied to each lookup
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::from_options(&LoadOptions::default())
    }
}

impl ExecutableResolver for PathResolver {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let binary = name.to_string();
        let search_path = self.search_path.clone();

        let path = run_bounded(name, self.timeout, move || {
            find_executable(&binary, search_path)
        })?;

        debug!("Resolved {} to {}", name, path.display());
        Ok(path)
    }
}

fn find_executable(name: &str, search_path: Option<OsString>) -> Result<PathBuf> {
    let found = match search_path {
        Some(paths) => {
            let cwd = std::env::current_dir().unwrap_or_default();
            which::which_in(name, Some(paths), cwd)
        }
        None => which::which(name),
    };

    found.map_err(|e| HostProbeError::missing(name, e))
}

/// Run `lookup` on a helper thread, waiting at most `timeout` for it
pub(crate) fn run_bounded<T, F>(name: &str, timeout: Duration, lookup: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = channel::bounded(1);

    thread::Builder::new()
        .name(format!("lookup-{}", name))
        .spawn(move || {
            // Receiver is gone if the caller already timed out
            let _ = tx.send(lookup());
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!("Lookup of {} did not finish within {:?}", name, timeout);
            Err(HostProbeError::timeout(name, timeout))
        }
        Err(RecvTimeoutError::Disconnected) => Err(HostProbeError::missing(
            name,
            "lookup thread terminated unexpectedly",
        )),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles for the lookup traits

    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    /// Write a shell stub named `name` into `dir` and mark it executable
    #[cfg(unix)]
    pub fn make_executable(dir: &Path, name: &str) -> PathBuf {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, b"#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Resolver answering from a fixed table
    #[derive(Debug, Default)]
    pub struct StaticResolver {
        known: HashMap<String, PathBuf>,
        hung: Vec<String>,
    }

    impl StaticResolver {
        pub fn with(mut self, name: &str, path: &str) -> Self {
            self.known.insert(name.to_string(), PathBuf::from(path));
            self
        }

        /// Lookups of `name` behave as if they timed out
        pub fn hung(mut self, name: &str) -> Self {
            self.hung.push(name.to_string());
            self
        }
    }

    impl ExecutableResolver for StaticResolver {
        fn resolve(&self, name: &str) -> Result<PathBuf> {
            if self.hung.iter().any(|h| h == name) {
                return Err(HostProbeError::timeout(name, Duration::from_millis(1)));
            }
            self.known
                .get(name)
                .cloned()
                .ok_or_else(|| HostProbeError::missing(name, "cannot find binary path"))
        }
    }

    /// Locator with fixed answers
    #[derive(Debug)]
    pub struct FixedLocator {
        pub exe: Option<PathBuf>,
        pub cwd: Option<PathBuf>,
    }

    impl FixedLocator {
        pub fn new(exe: &str, cwd: &str) -> Self {
            Self {
                exe: Some(PathBuf::from(exe)),
                cwd: Some(PathBuf::from(cwd)),
            }
        }
    }

    impl ProcessLocator for FixedLocator {
        fn current_exe(&self) -> io::Result<PathBuf> {
            self.exe
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no executable"))
        }

        fn current_dir(&self) -> io::Result<PathBuf> {
            self.cwd
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::PermissionDenied, "cwd unreadable"))
        }
    }
}
