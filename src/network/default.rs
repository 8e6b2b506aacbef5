//! Default networking component

use super::{Fabric, FabricComponent};
use crate::error::Result;
use crate::system::ExecutableResolver;

/// Generic networking available on every host
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNetwork;

impl FabricComponent for DefaultNetwork {
    fn fabric(&self) -> Fabric {
        Fabric::Default
    }

    fn load(&self, _resolver: &dyn ExecutableResolver) -> bool {
        true
    }

    // Nothing to save for generic networking
    fn persist(&self) -> Result<()> {
        Ok(())
    }
}
