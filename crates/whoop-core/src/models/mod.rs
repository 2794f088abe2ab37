// ABOUTME: WHOOP resource models and OAuth token types
// ABOUTME: Re-exports profile, cycle, recovery, sleep, workout, and token structures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Models
//!
//! Typed views of the WHOOP v2 resources. Only identifiers are required; every
//! other field is optional because WHOOP omits scores until a record has been
//! scored. Fields this crate does not model are kept in each record's `extra`
//! map. Absent and `null` fields both read as `None` and are left out when a
//! record is serialized, so use `WhoopApiClient::get_raw` where WHOOP's exact
//! JSON is needed.
//!
//! Timestamps stay in WHOOP's string form; use the `*_time()` helpers to get a
//! parsed `DateTime<Utc>`.

mod cycle;
mod oauth;
mod recovery;
mod sleep;
mod user;
mod workout;

pub use cycle::{Cycle, CycleScore};
pub use oauth::{StoredTokens, TokenPair};
pub use recovery::{Recovery, RecoveryScore};
pub use sleep::{Sleep, SleepNeeded, SleepScore, SleepStageSummary};
pub use user::{BodyMeasurements, UserProfile};
pub use workout::{Workout, WorkoutScore, ZoneDurations};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Fields WHOOP returned that have no typed counterpart
pub type ExtraFields = Map<String, Value>;

/// Score processing state reported on cycles, recoveries, sleeps and workouts
pub mod score_state {
    /// Score is available
    pub const SCORED: &str = "SCORED";
    /// Score is still being computed
    pub const PENDING_SCORE: &str = "PENDING_SCORE";
    /// Not enough data to score
    pub const UNSCORABLE: &str = "UNSCORABLE";
}

/// Parse an optional WHOOP timestamp (RFC 3339, `Z` or offset)
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
