//! Shared utilities for use cases.

use chrono::{SecondsFormat, Utc};

/// Current time as RFC 3339 UTC with a `Z` suffix.
pub(crate) fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
