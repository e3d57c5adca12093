//! Position-stream subscription lifecycle.
//!
//! The host platform delivers fixes by calling back into the run context;
//! this module only owns the subscription handle so it can never outlive a
//! session reset or a profile switch.

use crate::error::Result;

/// Handle returned by a position source for an active subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchId(pub u64);

/// Platform position stream (GPS).
pub trait PositionSource {
    /// Start delivering fixes. Fails with `SensorUnavailable` when there is
    /// no receiver or permission was denied.
    fn subscribe(&mut self) -> Result<WatchId>;
    fn unsubscribe(&mut self, id: WatchId);
}

/// Owns at most one live subscription.
pub struct PositionWatch {
    source: Option<Box<dyn PositionSource>>,
    active: Option<WatchId>,
}

impl PositionWatch {
    pub fn new(source: Option<Box<dyn PositionSource>>) -> Self {
        Self {
            source,
            active: None,
        }
    }

    /// A watch with no position source; `start` always degrades.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Subscribe if not already subscribed.
    ///
    /// Returns `false` when tracking could not start; the run continues
    /// without live distance.
    pub fn start(&mut self) -> bool {
        if self.active.is_some() {
            return true;
        }
        let Some(source) = self.source.as_mut() else {
            tracing::warn!("No position source available; live distance disabled");
            return false;
        };
        match source.subscribe() {
            Ok(id) => {
                tracing::debug!(watch_id = id.0, "Position tracking started");
                self.active = Some(id);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Position tracking unavailable");
                false
            }
        }
    }

    /// Drop the subscription. Calling this while not tracking is a no-op.
    pub fn stop(&mut self) {
        if let Some(id) = self.active.take() {
            if let Some(source) = self.source.as_mut() {
                source.unsubscribe(id);
            }
            tracing::debug!(watch_id = id.0, "Position tracking stopped");
        }
    }
}

impl Drop for PositionWatch {
    fn drop(&mut self) {
        self.stop();
    }
}
