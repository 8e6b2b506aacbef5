//! Configuration settings for HostProbe
//!
//! Defines the CLI arguments and the runtime options handed to the
//! detection and loading code.

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::time::Duration;

/// Default bound on a single executable lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// HostProbe - host environment detection for HPC tooling
#[derive(Parser, Debug, Clone)]
#[command(name = "hostprobe")]
#[command(author = "HostProbe Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Detect distro, network fabric and required binaries on the host")]
#[command(long_about = r#"
HostProbe inspects the host a tool is about to run on and assembles a
single configuration snapshot.

Detects:
  - Linux distribution (name, version, codename)
  - Network fabric (Infiniband when ibstat is present, default otherwise)
  - Location of the running binary and the current directory
  - Location of required binaries (sudo, sed)

Examples:
  hostprobe                          # Show the system configuration
  hostprobe --json show              # Same, as JSON
  hostprobe distro ubuntu:jammy      # Parse a distro descriptor
  hostprobe network                  # Detect the network fabric
"#)]
pub struct CliArgs {
    /// Host distro descriptor (e.g., centos:7, ubuntu:jammy); detected if omitted
    #[arg(long, env = "HOSTPROBE_DISTRO", value_name = "DESCR")]
    pub distro: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug mode
    #[arg(long)]
    pub debug: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Time bound for each executable lookup (e.g., 5, 5s, 500ms)
    #[arg(
        long,
        env = "HOSTPROBE_LOOKUP_TIMEOUT",
        default_value = "5s",
        value_name = "DURATION",
        value_parser = parse_timeout
    )]
    pub lookup_timeout: Duration,

    /// Search path used instead of $PATH for executable lookups
    #[arg(long, value_name = "PATHS")]
    pub search_path: Option<OsString>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Load and display the system configuration
    #[command(name = "show")]
    Show,

    /// Parse a distro descriptor (name:version or ubuntu:codename)
    #[command(name = "distro")]
    Distro {
        /// Descriptor to parse
        descriptor: String,
    },

    /// Detect the network fabric
    #[command(name = "network")]
    Network,

    /// Save the detected fabric's configuration
    #[command(name = "persist-network")]
    PersistNetwork,
}

/// Runtime options for loading the system configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Upper bound on each executable lookup
    pub lookup_timeout: Duration,
    /// Search path for lookups; `None` means the process `PATH`
    pub search_path: Option<OsString>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            search_path: None,
        }
    }
}

impl LoadOptions {
    /// Create options from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            lookup_timeout: args.lookup_timeout,
            search_path: args.search_path.clone(),
        }
    }

    /// Use a fixed search path instead of the process `PATH`
    pub fn with_search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }

    /// Override the lookup time bound
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }
}

/// Parse a timeout string (e.g., "5", "5s", "500ms", "2m")
pub fn parse_timeout(value: &str) -> Result<Duration, String> {
    let value = value.trim().to_lowercase();

    if value.is_empty() {
        return Err("Empty timeout string".to_string());
    }

    let (num_str, millis_per_unit) = if let Some(num) = value.strip_suffix("ms") {
        (num, 1u64)
    } else if let Some(num) = value.strip_suffix('s') {
        (num, 1000)
    } else if let Some(num) = value.strip_suffix('m') {
        (num, 60 * 1000)
    } else {
        // Bare numbers are seconds
        (value.as_str(), 1000)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid timeout: {}", value))?;

    if num == 0 {
        return Err("Timeout must be greater than zero".to_string());
    }

    let millis = num
        .checked_mul(millis_per_unit)
        .ok_or_else(|| format!("Timeout too large: {}", value))?;

    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_timeout("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_timeout("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_timeout("2m").unwrap(), Duration::from_secs(120));
        assert!(parse_timeout("").is_err());
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("fast").is_err());
    }

    #[test]
    fn test_parse_timeout_rejects_overflow() {
        let err = parse_timeout("18446744073709551615m").unwrap_err();
        assert!(err.contains("too large"));
        assert!(parse_timeout("18446744073709551615s").is_err());
        assert_eq!(
            parse_timeout("18446744073709551615ms").unwrap(),
            Duration::from_millis(u64::MAX)
        );
    }

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::try_parse_from(["hostprobe"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.verbose);
        assert_eq!(args.lookup_timeout, DEFAULT_LOOKUP_TIMEOUT);

        let options = LoadOptions::from_cli(&args);
        assert_eq!(options.search_path, args.search_path);
        assert_eq!(options.lookup_timeout, DEFAULT_LOOKUP_TIMEOUT);
    }

    #[test]
    fn test_cli_subcommands() {
        let args = CliArgs::try_parse_from(["hostprobe", "--json", "distro", "centos:7"]).unwrap();
        assert!(args.json);
        assert_eq!(
            args.command,
            Some(Commands::Distro {
                descriptor: "centos:7".to_string()
            })
        );

        let args = CliArgs::try_parse_from(["hostprobe", "--lookup-timeout", "250ms", "network"]).unwrap();
        assert_eq!(args.lookup_timeout, Duration::from_millis(250));
        assert_eq!(args.command, Some(Commands::Network));
    }

    #[test]
    fn test_load_options_builders() {
        let options = LoadOptions::default()
            .with_search_path("/opt/bin")
            .with_lookup_timeout(Duration::from_secs(1));
        assert_eq!(options.search_path, Some(OsString::from("/opt/bin")));
        assert_eq!(options.lookup_timeout, Duration::from_secs(1));
    }
}
