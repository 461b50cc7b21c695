use gloo::storage::{LocalStorage, Storage};
use shared::INSIGHTS_LAST_REQUEST_KEY;

/// Persisted throttle state for the insights fetch.
///
/// The timestamp lives in local storage, so the gate spans page reloads and
/// browser sessions. Reads and writes are not atomic; acceptable for a
/// single-user, single-tab client.
pub struct InsightsThrottleStore;

impl InsightsThrottleStore {
    /// Epoch millis of the last successful insights fetch, if any.
    pub fn last_request_ms() -> Option<f64> {
        LocalStorage::get::<f64>(INSIGHTS_LAST_REQUEST_KEY).ok()
    }

    /// Record a successful insights fetch.
    pub fn record(now_ms: f64) {
        let _ = LocalStorage::set(INSIGHTS_LAST_REQUEST_KEY, now_ms);
    }
}
