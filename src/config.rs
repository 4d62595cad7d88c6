use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::Serialize;

use crate::health_card::QrOptions;

/// Application-level constants
pub const APP_NAME: &str = "HealthCard Kerala";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for the local portal server.
pub const DEFAULT_PORT: u16 = 8080;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "healthcard=info,healthcard_lib=info,tower_http=warn"
}

// ═══════════════════════════════════════════════════════════
// Simulated latencies
// ═══════════════════════════════════════════════════════════

/// Artificial delays standing in for network calls.
///
/// Values match the waits the demo screens show the user. Tests use
/// [`SimulatedDelays::none`] so no test ever sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulatedDelays {
    pub registration: Duration,
    pub lookup: Duration,
    pub record_save: Duration,
    pub verification: Duration,
    pub scan: Duration,
}

impl Default for SimulatedDelays {
    fn default() -> Self {
        Self {
            registration: Duration::from_millis(2000),
            lookup: Duration::from_millis(1500),
            record_save: Duration::from_millis(1500),
            verification: Duration::from_millis(2000),
            scan: Duration::from_millis(2000),
        }
    }
}

impl SimulatedDelays {
    pub fn none() -> Self {
        Self {
            registration: Duration::ZERO,
            lookup: Duration::ZERO,
            record_save: Duration::ZERO,
            verification: Duration::ZERO,
            scan: Duration::ZERO,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Portal configuration
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub bind_addr: SocketAddr,
    pub delays: SimulatedDelays,
    pub qr: QrOptions,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            delays: SimulatedDelays::default(),
            qr: QrOptions::default(),
        }
    }
}

impl PortalConfig {
    /// Defaults overlaid with `HEALTHCARD_BIND` and `HEALTHCARD_FAST`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("HEALTHCARD_BIND") {
            match raw.parse::<SocketAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => tracing::warn!(value = %raw, "Ignoring invalid HEALTHCARD_BIND: {e}"),
            }
        }

        if lookup("HEALTHCARD_FAST").as_deref() == Some("1") {
            config.delays = SimulatedDelays::none();
        }

        config
    }
}
