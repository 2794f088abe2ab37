// ABOUTME: Physiological cycle model and its strain score
// ABOUTME: A cycle spans one wake-to-wake period and is the parent of sleep and recovery
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_timestamp, score_state, ExtraFields};

/// A WHOOP physiological cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    /// Cycle id, used by the cycle-scoped sleep and recovery endpoints
    pub id: i64,
    /// Owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Cycle start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Cycle end, absent while the cycle is still open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Member's UTC offset at the time of the cycle (e.g. `-05:00`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<String>,
    /// `SCORED`, `PENDING_SCORE` or `UNSCORABLE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_state: Option<String>,
    /// Strain score when scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<CycleScore>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Cycle {
    /// Parsed cycle start
    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.start.as_deref())
    }

    /// Parsed cycle end, `None` for the current cycle
    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.end.as_deref())
    }

    /// Whether WHOOP has finished scoring this cycle
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.score_state.as_deref() == Some(score_state::SCORED) && self.score.is_some()
    }
}

/// Day strain and energy expenditure for a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleScore {
    /// Cardiovascular strain on the 0-21 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: Option<f64>,
    /// Energy expended in kilojoules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilojoule: Option<f64>,
    /// Average heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<u32>,
    /// Maximum heart rate (bpm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_cycle_has_no_end() {
        let cycle: Cycle = serde_json::from_value(json!({
            "id": 93845,
            "user_id": 10129,
            "start": "2022-04-24T02:25:44.774Z",
            "timezone_offset": "-05:00",
            "score_state": "PENDING_SCORE"
        }))
        .unwrap();
        assert!(cycle.start_time().is_some());
        assert!(cycle.end_time().is_none());
        assert!(cycle.score.is_none());
        assert!(!cycle.is_scored());
    }

    #[test]
    fn test_unknown_fields_survive_reserialization() {
        let raw = json!({
            "id": 93845,
            "score_state": "SCORED",
            "score": {"strain": 5.2951527, "kilojoule": 8288.297, "average_heart_rate": 68, "max_heart_rate": 141, "percent_recorded": 100},
            "new_field": {"nested": [1, 2, 3]}
        });
        let cycle: Cycle = serde_json::from_value(raw.clone()).unwrap();
        assert!(cycle.is_scored());
        assert_eq!(serde_json::to_value(&cycle).unwrap(), raw);
    }
}
