// ABOUTME: User profile and body measurement models
// ABOUTME: Mirrors WHOOP's /user/profile/basic and /user/measurement/body responses
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};

use super::ExtraFields;

/// Basic profile of the authenticated WHOOP member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// WHOOP user id
    pub user_id: i64,
    /// Account email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// First name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl UserProfile {
    /// Name used when greeting the member, falling back to the email
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self
                .email
                .clone()
                .unwrap_or_else(|| format!("user {}", self.user_id)),
        }
    }
}

/// Body measurements recorded in the WHOOP app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    /// Height in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_meter: Option<f64>,
    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kilogram: Option<f64>,
    /// Maximum heart rate in beats per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Unmodelled fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}
