//! Portal server lifecycle: starts and stops the axum HTTP server that
//! serves the worker and doctor screens.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::router::portal_router;
use crate::portal::Portal;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Session metadata for a running portal server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

impl ServerSession {
    pub fn url(&self) -> String {
        format!("http://{}", self.server_addr)
    }
}

/// Handle to a running portal server.
pub struct PortalServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl PortalServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!(session_id = %self.session.session_id, "Portal shutdown requested");
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Start the portal server on `addr`.
///
/// Port 0 picks an ephemeral port; the bound port is reported in the
/// returned session.
pub async fn start_server_on(portal: Arc<Portal>, addr: SocketAddr) -> Result<PortalServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind portal server on {addr}: {e}"))?;
    let bound = listener
        .local_addr()
        .map_err(|e| format!("Cannot read bound portal address: {e}"))?;

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: bound.to_string(),
        port: bound.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let app = portal_router(portal);

    tracing::info!(addr = %bound, session_id = %session.session_id, "Serving portal");
    tokio::spawn(async move {
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
        match served {
            Ok(()) => tracing::info!(addr = %bound, "Portal closed"),
            Err(e) => tracing::error!(addr = %bound, "Portal server failed: {e}"),
        }
    });

    Ok(PortalServer {
        session,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Start the portal server on the configured bind address.
pub async fn start_server(portal: Arc<Portal>) -> Result<PortalServer, String> {
    let addr = portal.config().bind_addr;
    start_server_on(portal, addr).await
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    use crate::config::{PortalConfig, SimulatedDelays};

    fn test_portal() -> Arc<Portal> {
        Arc::new(Portal::new(PortalConfig {
            delays: SimulatedDelays::none(),
            ..PortalConfig::default()
        }))
    }

    fn loopback() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start_server_on(test_portal(), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        let url = format!("{}/api/health", server.session.url());
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn server_session_has_valid_metadata() {
        let mut server = start_server_on(test_portal(), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.started_at.is_empty());
        assert!(server.session.server_addr.starts_with("127.0.0.1:"));

        server.shutdown();
    }

    #[tokio::test]
    async fn server_runs_worker_registration() {
        let mut server = start_server_on(test_portal(), loopback())
            .await
            .expect("server should start");

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("{}/api/workers", server.session.url()))
            .json(&serde_json::json!({
                "name": "Priya Sharma",
                "age": "28",
                "gender": "Female",
                "contact": "+91 8765432109"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert!(json["worker"]["user_id"].as_str().unwrap().starts_with("USR"));

        let resp = reqwest::get(format!("{}/api/nonexistent", server.session.url()))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let mut first = start_server_on(test_portal(), loopback()).await.unwrap();
        let taken: SocketAddr = first.session.server_addr.parse().unwrap();

        let err = start_server_on(test_portal(), taken).await.err().unwrap();
        assert!(err.contains("Failed to bind"));

        first.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_server_on(test_portal(), loopback())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown();
    }
}
