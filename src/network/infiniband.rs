//! Infiniband networking component

use super::{Fabric, FabricComponent};
use crate::error::{HostProbeError, Result};
use crate::system::ExecutableResolver;
use tracing::{info, warn};

/// Fabric status tool whose presence signals Infiniband
pub const IBSTAT_BIN: &str = "ibstat";

/// Configuration key forcing Infiniband to always be used
pub const IB_FORCE_KEY: &str = "force_ib";

/// Configuration key for the directory where MXM files are installed
pub const MXM_DIR_KEY: &str = "mxm_dir";

/// Configuration key for the directory where knem files are installed
pub const KNEM_DIR_KEY: &str = "knem_dir";

/// Infiniband networking component
#[derive(Debug, Clone, Copy, Default)]
pub struct Infiniband;

impl FabricComponent for Infiniband {
    fn fabric(&self) -> Fabric {
        Fabric::Infiniband
    }

    fn load(&self, resolver: &dyn ExecutableResolver) -> bool {
        match resolver.resolve(IBSTAT_BIN) {
            Ok(path) => {
                info!("Infiniband detected ({})", path.display());
                true
            }
            Err(e @ HostProbeError::LookupTimeout { .. }) => {
                warn!("Infiniband not detected: {}", e);
                false
            }
            Err(_) => {
                info!("Infiniband not detected");
                false
            }
        }
    }

    fn persist(&self) -> Result<()> {
        Err(HostProbeError::not_implemented("saving the Infiniband configuration"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::testing::StaticResolver;

    #[test]
    fn test_load_requires_ibstat() {
        let present = StaticResolver::default().with(IBSTAT_BIN, "/usr/sbin/ibstat");
        assert!(Infiniband.load(&present));

        let absent = StaticResolver::default().with("sed", "/bin/sed");
        assert!(!Infiniband.load(&absent));
    }

    #[test]
    fn test_persist_is_not_implemented() {
        let err = Infiniband.persist().unwrap_err();
        assert!(matches!(err, HostProbeError::NotImplemented(_)));
        assert!(!matches!(err, HostProbeError::Io(_)));
    }

    #[test]
    fn test_config_keys() {
        assert_eq!(IB_FORCE_KEY, "force_ib");
        assert_eq!(MXM_DIR_KEY, "mxm_dir");
        assert_eq!(KNEM_DIR_KEY, "knem_dir");
    }
}
