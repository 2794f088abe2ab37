// ABOUTME: Recovery model and recovery score
// ABOUTME: One recovery per cycle, keyed by cycle id and the sleep it was computed from
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};

use super::ExtraFields;

/// Recovery computed for a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recovery {
    /// Cycle this recovery belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<i64>,
    /// Sleep the recovery was computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_id: Option<String>,
    /// Owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// `SCORED`, `PENDING_SCORE` or `UNSCORABLE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_state: Option<String>,
    /// Recovery metrics when scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<RecoveryScore>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Recovery metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScore {
    /// Whether the member is still calibrating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_calibrating: Option<bool>,
    /// Recovery percentage (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_score: Option<f64>,
    /// Resting heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<f64>,
    /// Heart rate variability, RMSSD in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hrv_rmssd_milli: Option<f64>,
    /// Blood oxygen saturation (4.0 members)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spo2_percentage: Option<f64>,
    /// Skin temperature in Celsius (4.0 members)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_temp_celsius: Option<f64>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}
