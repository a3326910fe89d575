//! Connectivity port (driven/secondary port)
//!
//! Read-only view of the current network status. The synchronizer consults
//! it before touching the network; the monitor in `lingo-sync` implements it.

use crate::domain::ConnectivityState;

/// Port trait for reading the current connectivity state
pub trait IConnectivity: Send + Sync {
    /// Returns the current network status
    fn state(&self) -> ConnectivityState;

    /// Returns true when the network is believed reachable
    fn is_online(&self) -> bool {
        self.state().is_online()
    }
}

/// Fixed connectivity, for one-shot commands and tests
#[derive(Debug, Clone, Copy)]
pub struct StaticConnectivity(pub ConnectivityState);

impl IConnectivity for StaticConnectivity {
    fn state(&self) -> ConnectivityState {
        self.0
    }
}
