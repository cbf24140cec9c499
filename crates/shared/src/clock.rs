//! Monotonic millisecond timestamps for template saves.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST_ISSUED_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Returns the current time in milliseconds since the Unix epoch.
///
/// Every value handed out within a process is strictly greater than the
/// previous one, even when the wall clock stalls or steps backwards.
pub fn now_millis() -> i64 {
    let wall = Utc::now().timestamp_millis();
    let previous = LAST_ISSUED_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(wall.max(last + 1))
        })
        .unwrap_or(wall);
    wall.max(previous + 1)
}
