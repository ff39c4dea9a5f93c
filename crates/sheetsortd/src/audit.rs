//! Error auditor - best-effort failure rows in the System_Logs tab.
//!
//! When a request fails after validation, one row with the failing URL and
//! the error text goes to a dedicated tab. This channel must never raise:
//! a failure here is only worth a local warning, and must not mask the
//! error that triggered the audit in the first place.

use crate::sheets::{SheetWriter, TabStore};
use chrono::Local;
use tracing::warn;

/// Tab all audit rows land in.
pub const AUDIT_TAB: &str = "System_Logs";

/// Header row for the audit tab.
pub const AUDIT_HEADER: [&str; 4] = ["Date", "Timestamp", "Failed_URL", "Error_Message"];

/// Record one failed request. Swallows every internal fault.
pub async fn log_failure(store: &dyn TabStore, failed_url: &str, error_message: &str) {
    let now = Local::now();
    let row = vec![
        now.format("%Y-%m-%d").to_string(),
        now.format("%H:%M:%S").to_string(),
        failed_url.to_string(),
        error_message.to_string(),
    ];

    if let Err(e) = SheetWriter::append_row(store, AUDIT_TAB, &AUDIT_HEADER, &row).await {
        warn!("Audit write failed (original error: {}): {}", error_message, e);
    }
}
