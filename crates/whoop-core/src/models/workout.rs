// ABOUTME: Workout activity model with strain score and heart rate zone durations
// ABOUTME: Mirrors WHOOP's /activity/workout resources
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_timestamp, ExtraFields};

/// A workout recorded by WHOOP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Workout id (UUID)
    pub id: String,
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
    /// Workout start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Workout end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Member's UTC offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<String>,
    /// Sport name (e.g. `running`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_name: Option<String>,
    /// Legacy numeric sport id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_id: Option<i64>,
    /// `SCORED`, `PENDING_SCORE` or `UNSCORABLE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_state: Option<String>,
    /// Workout metrics when scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<WorkoutScore>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Workout {
    /// Parsed workout start
    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.start.as_deref())
    }

    /// Parsed workout end
    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.end.as_deref())
    }

    /// Workout length in seconds when both ends are known
    #[must_use]
    pub fn duration_seconds(&self) -> Option<i64> {
        Some((self.end_time()? - self.start_time()?).num_seconds())
    }
}

/// Workout metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutScore {
    /// Cardiovascular strain on the 0-21 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: Option<f64>,
    /// Average heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<u32>,
    /// Maximum heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Energy expended in kilojoules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilojoule: Option<f64>,
    /// Share of the workout with heart rate data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_recorded: Option<f64>,
    /// Distance in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meter: Option<f64>,
    /// Total ascent in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_gain_meter: Option<f64>,
    /// Net altitude change in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_change_meter: Option<f64>,
    /// Time spent in each heart rate zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_durations: Option<ZoneDurations>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Milliseconds spent in each heart rate zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDurations {
    /// Below zone one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_zero_milli: Option<i64>,
    /// 50-60% of max heart rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_one_milli: Option<i64>,
    /// 60-70%
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_two_milli: Option<i64>,
    /// 70-80%
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_three_milli: Option<i64>,
    /// 80-90%
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_four_milli: Option<i64>,
    /// 90-100%
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_five_milli: Option<i64>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duration_from_start_and_end() {
        let workout: Workout = serde_json::from_value(json!({
            "id": "ecfc6a15-4661-442f-a9a4-f160dd7afae8",
            "start": "2022-04-24T02:25:44.774Z",
            "end": "2022-04-24T03:25:44.774Z",
            "sport_name": "running"
        }))
        .unwrap();
        assert_eq!(workout.duration_seconds(), Some(3600));
    }
}
