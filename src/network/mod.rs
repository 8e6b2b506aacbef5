//! Network fabric detection
//!
//! Detects which network fabric the host offers and loads the matching
//! networking component:
//! - Default networking (always available)
//! - Infiniband (when `ibstat` is on the search path)
//!
//! ## Detection Order
//!
//! The default component is loaded first and must always succeed; failing
//! that is a fatal condition reported as
//! [`HostProbeError::NoDefaultNetwork`]. Specialized fabrics are then tried
//! in the order of [`Fabric::SPECIALIZED`], and the first one that loads
//! wins over the default.

mod default;
mod infiniband;

pub use default::DefaultNetwork;
pub use infiniband::{Infiniband, IBSTAT_BIN, IB_FORCE_KEY, KNEM_DIR_KEY, MXM_DIR_KEY};

use crate::error::{HostProbeError, Result};
use crate::system::ExecutableResolver;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// ID used to identify Infiniband
pub const INFINIBAND_ID: &str = "IB";

/// ID used to identify the default networking configuration
pub const DEFAULT_ID: &str = "default";

/// Network fabric available on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Fabric {
    /// Generic networking, no specialized fabric
    #[serde(rename = "default")]
    Default,
    /// Infiniband fabric
    #[serde(rename = "IB")]
    Infiniband,
}

impl Fabric {
    /// Specialized fabrics, in detection priority order
    pub const SPECIALIZED: [Fabric; 1] = [Fabric::Infiniband];

    /// Identifier of this fabric ("default", "IB")
    pub fn id(&self) -> &'static str {
        match self {
            Fabric::Default => DEFAULT_ID,
            Fabric::Infiniband => INFINIBAND_ID,
        }
    }

    /// Networking component handling this fabric
    pub fn component(&self) -> &'static dyn FabricComponent {
        match self {
            Fabric::Default => &DefaultNetwork,
            Fabric::Infiniband => &Infiniband,
        }
    }

    /// Returns true for any fabric other than the default
    pub fn is_specialized(&self) -> bool {
        !matches!(self, Fabric::Default)
    }
}

impl fmt::Display for Fabric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Networking component for one fabric
pub trait FabricComponent: Sync {
    /// Fabric handled by this component
    fn fabric(&self) -> Fabric;

    /// Check whether the fabric is present; returns the "loaded" flag
    fn load(&self, resolver: &dyn ExecutableResolver) -> bool;

    /// Save the fabric's configuration into the tool's configuration file
    fn persist(&self) -> Result<()>;
}

/// Details about the network on the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    /// Detected fabric
    #[serde(rename = "id")]
    pub fabric: Fabric,
}

impl NetworkInfo {
    /// Identifier of the detected fabric
    pub fn id(&self) -> &'static str {
        self.fabric.id()
    }

    /// Save the configuration of the detected fabric
    ///
    /// Callers must not assume this succeeds; some fabrics do not
    /// implement persistence.
    pub fn persist(&self) -> Result<()> {
        self.fabric.component().persist()
    }

    /// Returns true when the detected fabric has configuration to save
    pub fn has_config_to_persist(&self) -> bool {
        self.fabric.is_specialized()
    }

    /// Print the network summary to stdout
    pub fn display(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for NetworkInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network configuration:")?;
        writeln!(f, "\tID: {}", self.id())
    }
}

/// Detect the network on the system and load the corresponding component
pub fn detect(resolver: &dyn ExecutableResolver) -> Result<NetworkInfo> {
    let specialized: Vec<&dyn FabricComponent> =
        Fabric::SPECIALIZED.iter().map(|f| f.component()).collect();
    detect_with(&DefaultNetwork, &specialized, resolver)
}

fn detect_with(
    default: &dyn FabricComponent,
    specialized: &[&dyn FabricComponent],
    resolver: &dyn ExecutableResolver,
) -> Result<NetworkInfo> {
    if !default.load(resolver) {
        return Err(HostProbeError::NoDefaultNetwork);
    }

    for component in specialized {
        if component.load(resolver) {
            return Ok(NetworkInfo {
                fabric: component.fabric(),
            });
        }
    }

    debug!("No specialized fabric found, using default networking");
    Ok(NetworkInfo {
        fabric: default.fabric(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::testing::StaticResolver;

    struct BrokenDefault;

    impl FabricComponent for BrokenDefault {
        fn fabric(&self) -> Fabric {
            Fabric::Default
        }

        fn load(&self, _resolver: &dyn ExecutableResolver) -> bool {
            false
        }

        fn persist(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_detect_default_without_ibstat() {
        let resolver = StaticResolver::default().with("sed", "/usr/bin/sed");
        let info = detect(&resolver).unwrap();
        assert_eq!(info.fabric, Fabric::Default);
        assert_eq!(info.id(), "default");
    }

    #[test]
    fn test_detect_infiniband_with_ibstat() {
        let resolver = StaticResolver::default().with(IBSTAT_BIN, "/usr/sbin/ibstat");
        let info = detect(&resolver).unwrap();
        assert_eq!(info.fabric, Fabric::Infiniband);
        assert_eq!(info.id(), "IB");
    }

    #[test]
    fn test_detect_is_idempotent() {
        let with_ib = StaticResolver::default().with(IBSTAT_BIN, "/usr/sbin/ibstat");
        let without_ib = StaticResolver::default();

        let first = detect(&with_ib).unwrap();
        let _ = detect(&without_ib).unwrap();
        let second = detect(&with_ib).unwrap();
        assert_eq!(first, second);

        assert_eq!(detect(&without_ib).unwrap(), detect(&without_ib).unwrap());
    }

    #[test]
    fn test_hung_ibstat_lookup_falls_back_to_default() {
        let resolver = StaticResolver::default().hung(IBSTAT_BIN);
        let info = detect(&resolver).unwrap();
        assert_eq!(info.fabric, Fabric::Default);
    }

    #[test]
    fn test_missing_default_is_fatal() {
        let resolver = StaticResolver::default().with(IBSTAT_BIN, "/usr/sbin/ibstat");
        let specialized: Vec<&dyn FabricComponent> = vec![&Infiniband];

        let err = detect_with(&BrokenDefault, &specialized, &resolver).unwrap_err();
        assert!(matches!(err, HostProbeError::NoDefaultNetwork));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_infiniband_persist_always_fails() {
        let info = NetworkInfo {
            fabric: Fabric::Infiniband,
        };
        for _ in 0..3 {
            let err = info.persist().unwrap_err();
            assert!(err.is_not_implemented());
        }
    }

    #[test]
    fn test_default_persist_is_noop() {
        let info = NetworkInfo {
            fabric: Fabric::Default,
        };
        assert!(!info.has_config_to_persist());
        assert!(info.persist().is_ok());

        let ib = NetworkInfo {
            fabric: Fabric::Infiniband,
        };
        assert!(ib.has_config_to_persist());
    }

    #[test]
    fn test_fabric_ids_are_never_empty() {
        for fabric in [Fabric::Default, Fabric::Infiniband] {
            assert!(!fabric.id().is_empty());
            assert_eq!(fabric.component().fabric(), fabric);
        }
        assert!(Fabric::Infiniband.is_specialized());
        assert!(!Fabric::Default.is_specialized());
    }

    #[test]
    fn test_network_display() {
        let info = NetworkInfo {
            fabric: Fabric::Infiniband,
        };
        assert_eq!(info.to_string(), "Network configuration:\n\tID: IB\n");
    }

    #[test]
    fn test_network_serializes_id() {
        let info = NetworkInfo {
            fabric: Fabric::Infiniband,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"id":"IB"}"#);
    }
}
