//! Network connectivity state

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Process-wide network status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    Online,
    Offline,
}

impl ConnectivityState {
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityState::Online)
    }

    pub fn from_online(online: bool) -> Self {
        if online {
            ConnectivityState::Online
        } else {
            ConnectivityState::Offline
        }
    }
}

impl Display for ConnectivityState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectivityState::Online => "online",
            ConnectivityState::Offline => "offline",
        };
        write!(f, "{}", s)
    }
}
