//! Simulated submission gateway.
//!
//! Every operation that would hit a server in a real deployment goes through
//! `submit`: it waits the configured delay and hands the payload back. The
//! failure switch lets tests reach the "please try again" branch, which no
//! real cause can trigger.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::SimulatedDelays;
use crate::error::PortalError;

/// Kind of simulated call, used to pick its delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Registration,
    Lookup,
    RecordSave,
    Verification,
    Scan,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Lookup => "lookup",
            Self::RecordSave => "record save",
            Self::Verification => "verification",
            Self::Scan => "scan",
        }
    }
}

pub struct Gateway {
    delays: SimulatedDelays,
    fail: AtomicBool,
}

impl Gateway {
    pub fn new(delays: SimulatedDelays) -> Self {
        Self {
            delays,
            fail: AtomicBool::new(false),
        }
    }

    /// Gateway that never sleeps.
    pub fn instant() -> Self {
        Self::new(SimulatedDelays::none())
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        match op {
            Operation::Registration => self.delays.registration,
            Operation::Lookup => self.delays.lookup,
            Operation::RecordSave => self.delays.record_save,
            Operation::Verification => self.delays.verification,
            Operation::Scan => self.delays.scan,
        }
    }

    /// Wait out the operation's delay, then return the payload or a failure.
    pub async fn submit<T>(&self, op: Operation, payload: T) -> Result<T, PortalError> {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            tracing::warn!(operation = op.as_str(), "Simulated operation failed");
            return Err(PortalError::SimulatedFailure {
                operation: op.as_str(),
            });
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn instant_gateway_echoes_payload() {
        let gateway = Gateway::instant();
        assert_eq!(gateway.submit(Operation::Registration, 7u32).await, Ok(7));
    }

    #[tokio::test]
    async fn failing_gateway_reports_operation() {
        let gateway = Gateway::instant();
        gateway.set_failing(true);
        let err = gateway.submit(Operation::Lookup, ()).await.unwrap_err();
        assert_eq!(err, PortalError::SimulatedFailure { operation: "lookup" });

        gateway.set_failing(false);
        assert!(gateway.submit(Operation::Lookup, ()).await.is_ok());
    }

    #[tokio::test]
    async fn configured_delay_is_waited() {
        let mut delays = SimulatedDelays::none();
        delays.record_save = Duration::from_millis(20);
        let gateway = Gateway::new(delays);

        let started = std::time::Instant::now();
        gateway.submit(Operation::RecordSave, ()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn delays_map_per_operation() {
        let gateway = Gateway::new(SimulatedDelays::default());
        assert_eq!(gateway.delay_for(Operation::Scan), Duration::from_secs(2));
        assert_eq!(gateway.delay_for(Operation::Lookup), Duration::from_millis(1500));
    }
}
