//! Reachability probe
//!
//! Decides online/offline by opening a TCP connection to the API host.
//! Feeds [`ConnectivityEvent`]s into the monitor's channel whenever the
//! observed state changes.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use lingo_core::domain::ConnectivityState;

use crate::monitor::ConnectivityEvent;
use crate::MonitorError;

/// Periodic TCP reachability check
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    host: String,
    port: u16,
    interval: Duration,
    timeout: Duration,
}

impl ReachabilityProbe {
    /// # Errors
    /// `MonitorError::InvalidSchedule` if `interval` or `timeout` is zero
    pub fn new(
        host: impl Into<String>,
        port: u16,
        interval: Duration,
        timeout: Duration,
    ) -> Result<Self, MonitorError> {
        if interval.is_zero() {
            return Err(MonitorError::InvalidSchedule("interval must be non-zero".into()));
        }
        if timeout.is_zero() {
            return Err(MonitorError::InvalidSchedule("timeout must be non-zero".into()));
        }
        Ok(Self {
            host: host.into(),
            port,
            interval,
            timeout,
        })
    }

    /// Probes the host and port of `base_url`
    ///
    /// The port defaults to the scheme's well-known port.
    ///
    /// # Errors
    /// `MonitorError::InvalidTarget` if the URL does not parse or names no host,
    /// `MonitorError::InvalidSchedule` for a zero interval or timeout
    pub fn for_url(base_url: &str, interval: Duration, timeout: Duration) -> Result<Self, MonitorError> {
        let url = Url::parse(base_url)
            .map_err(|e| MonitorError::InvalidTarget(format!("{base_url}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| MonitorError::InvalidTarget(format!("{base_url}: no host")))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| MonitorError::InvalidTarget(format!("{base_url}: no port")))?;
        Self::new(host, port, interval, timeout)
    }

    /// `host:port` being probed
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Runs one check
    pub async fn check(&self) -> ConnectivityState {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        let online = match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                debug!(target_addr = %self.target(), error = %err, "Probe connect failed");
                false
            }
            Err(_) => {
                debug!(target_addr = %self.target(), "Probe timed out");
                false
            }
        };
        ConnectivityState::from_online(online)
    }

    /// Checks every `interval` and reports changes from `last_known`
    ///
    /// Stops when `cancel` fires.
    ///
    /// # Errors
    /// `MonitorError::ChannelClosed` if the monitor stopped listening
    pub async fn run(
        &self,
        events: mpsc::Sender<ConnectivityEvent>,
        mut last_known: ConnectivityState,
        cancel: CancellationToken,
    ) -> Result<(), MonitorError> {
        info!(
            target_addr = %self.target(),
            interval_secs = self.interval.as_secs(),
            "Reachability probe starting"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Reachability probe stopped");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    let observed = self.check().await;
                    if observed != last_known {
                        debug!(from = %last_known, to = %observed, "Reachability changed");
                        events
                            .send(ConnectivityEvent::announcing(observed))
                            .await
                            .map_err(|_| MonitorError::ChannelClosed)?;
                        last_known = observed;
                    }
                }
            }
        }
    }
}
