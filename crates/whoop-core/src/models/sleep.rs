// ABOUTME: Sleep activity model with stage summary and sleep need breakdown
// ABOUTME: Covers both overnight sleeps and naps
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_timestamp, ExtraFields};

/// A sleep or nap recorded by WHOOP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sleep {
    /// Sleep id (UUID)
    pub id: String,
    /// Cycle the sleep belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<i64>,
    /// Legacy v1 id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v1_id: Option<i64>,
    /// Owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Sleep start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Sleep end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Member's UTC offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<String>,
    /// Whether this was a nap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nap: Option<bool>,
    /// `SCORED`, `PENDING_SCORE` or `UNSCORABLE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_state: Option<String>,
    /// Sleep metrics when scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<SleepScore>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Sleep {
    /// Parsed sleep start
    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.start.as_deref())
    }

    /// Parsed sleep end
    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.end.as_deref())
    }
}

/// Sleep metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepScore {
    /// Time spent in each stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_summary: Option<SleepStageSummary>,
    /// How much sleep was needed and why
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_needed: Option<SleepNeeded>,
    /// Breaths per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<f64>,
    /// Sleep obtained versus sleep needed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_performance_percentage: Option<f64>,
    /// Similarity of sleep and wake times over recent days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_consistency_percentage: Option<f64>,
    /// Time asleep versus time in bed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_efficiency_percentage: Option<f64>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Milliseconds spent per sleep stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepStageSummary {
    /// Total time in bed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_in_bed_time_milli: Option<i64>,
    /// Awake time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_awake_time_milli: Option<i64>,
    /// Time without strap data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_no_data_time_milli: Option<i64>,
    /// Light sleep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_light_sleep_time_milli: Option<i64>,
    /// Slow wave (deep) sleep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_slow_wave_sleep_time_milli: Option<i64>,
    /// REM sleep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rem_sleep_time_milli: Option<i64>,
    /// Completed sleep cycles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_cycle_count: Option<u32>,
    /// Disturbances during the sleep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disturbance_count: Option<u32>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SleepStageSummary {
    /// Time actually asleep (light + deep + REM)
    #[must_use]
    pub fn total_sleep_time_milli(&self) -> Option<i64> {
        let light = self.total_light_sleep_time_milli?;
        let deep = self.total_slow_wave_sleep_time_milli?;
        let rem = self.total_rem_sleep_time_milli?;
        Some(light + deep + rem)
    }
}

/// Breakdown of the sleep need in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepNeeded {
    /// Baseline need
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_milli: Option<i64>,
    /// Extra need from accumulated sleep debt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_from_sleep_debt_milli: Option<i64>,
    /// Extra need from recent strain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_from_recent_strain_milli: Option<i64>,
    /// Reduction from recent naps (negative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_from_recent_nap_milli: Option<i64>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_sleep_excludes_awake_time() {
        let summary: SleepStageSummary = serde_json::from_value(json!({
            "total_in_bed_time_milli": 30_272_735,
            "total_awake_time_milli": 1_403_507,
            "total_light_sleep_time_milli": 14_905_851,
            "total_slow_wave_sleep_time_milli": 6_630_370,
            "total_rem_sleep_time_milli": 5_879_573,
            "sleep_cycle_count": 3,
            "disturbance_count": 12
        }))
        .unwrap();
        assert_eq!(summary.total_sleep_time_milli(), Some(27_415_794));
    }

    #[test]
    fn test_pending_sleep_has_no_score() {
        let sleep: Sleep = serde_json::from_value(json!({
            "id": "ecfc6a15-4661-442f-a9a4-f160dd7afae8",
            "nap": false,
            "score_state": "PENDING_SCORE"
        }))
        .unwrap();
        assert_eq!(sleep.nap, Some(false));
        assert!(sleep.score.is_none());
    }
}
