// ABOUTME: Typed tool calls parsed from an MCP tool name and JSON argument bag
// ABOUTME: Validates argument presence and JSON types before any WHOOP request is made
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde_json::{Map, Value};
use whoop_core::constants::tools::{
    ARG_ACCESS_TOKEN, ARG_CODE, ARG_CYCLE_ID, ARG_END, ARG_LIMIT, ARG_NEXT_TOKEN,
    ARG_REFRESH_TOKEN, ARG_SLEEP_ID, ARG_START, ARG_WORKOUT_ID, EXCHANGE_CODE_FOR_TOKEN,
    GET_AUTHORIZATION_URL, GET_CYCLE_BY_ID, GET_CYCLE_COLLECTION, GET_RECOVERY_COLLECTION,
    GET_RECOVERY_FOR_CYCLE, GET_SLEEP_BY_ID, GET_SLEEP_COLLECTION, GET_SLEEP_FOR_CYCLE,
    GET_USER_BODY_MEASUREMENTS, GET_USER_PROFILE, GET_WORKOUT_BY_ID, GET_WORKOUT_COLLECTION,
    REFRESH_TOKEN, REVOKE_USER_ACCESS, SET_ACCESS_TOKEN,
};
use whoop_core::errors::ToolError;
use whoop_core::pagination::PaginationParams;

/// One fully-typed tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoopTool {
    /// `whoop-get-user-profile`
    GetUserProfile,
    /// `whoop-get-user-body-measurements`
    GetUserBodyMeasurements,
    /// `whoop-revoke-user-access`
    RevokeUserAccess,
    /// `whoop-get-cycle-by-id`
    GetCycleById {
        /// Cycle identifier
        cycle_id: i64,
    },
    /// `whoop-get-cycle-collection`
    GetCycleCollection(PaginationParams),
    /// `whoop-get-sleep-for-cycle`
    GetSleepForCycle {
        /// Cycle identifier
        cycle_id: i64,
    },
    /// `whoop-get-recovery-collection`
    GetRecoveryCollection(PaginationParams),
    /// `whoop-get-recovery-for-cycle`
    GetRecoveryForCycle {
        /// Cycle identifier
        cycle_id: i64,
    },
    /// `whoop-get-sleep-by-id`
    GetSleepById {
        /// Sleep identifier
        sleep_id: String,
    },
    /// `whoop-get-sleep-collection`
    GetSleepCollection(PaginationParams),
    /// `whoop-get-workout-by-id`
    GetWorkoutById {
        /// Workout identifier
        workout_id: String,
    },
    /// `whoop-get-workout-collection`
    GetWorkoutCollection(PaginationParams),
    /// `whoop-get-authorization-url`
    GetAuthorizationUrl,
    /// `whoop-exchange-code-for-token`
    ExchangeCodeForToken {
        /// Authorization code from the callback
        code: String,
    },
    /// `whoop-refresh-token`
    RefreshToken {
        /// Refresh token from a previous grant
        refresh_token: String,
    },
    /// `whoop-set-access-token`
    SetAccessToken {
        /// Bearer token for later calls
        access_token: String,
    },
}

impl WhoopTool {
    /// Build a typed call from a tool name and its `arguments` object.
    ///
    /// A missing or `null` argument bag is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for an unregistered name,
    /// [`ToolError::MissingParameter`] when a required argument is absent or
    /// has the wrong JSON type, and [`ToolError::InvalidParameter`] when an
    /// optional argument is present with the wrong type
    pub fn parse(name: &str, arguments: Option<&Value>) -> Result<Self, ToolError> {
        let empty = Map::new();
        let args = match arguments {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => &empty,
            Some(_) => {
                return Err(ToolError::invalid_parameter(
                    "arguments",
                    "must be an object",
                ))
            }
        };

        let tool = match name {
            GET_USER_PROFILE => Self::GetUserProfile,
            GET_USER_BODY_MEASUREMENTS => Self::GetUserBodyMeasurements,
            REVOKE_USER_ACCESS => Self::RevokeUserAccess,
            GET_CYCLE_BY_ID => Self::GetCycleById {
                cycle_id: required_integer(args, ARG_CYCLE_ID)?,
            },
            GET_CYCLE_COLLECTION => Self::GetCycleCollection(pagination(args)?),
            GET_SLEEP_FOR_CYCLE => Self::GetSleepForCycle {
                cycle_id: required_integer(args, ARG_CYCLE_ID)?,
            },
            GET_RECOVERY_COLLECTION => Self::GetRecoveryCollection(pagination(args)?),
            GET_RECOVERY_FOR_CYCLE => Self::GetRecoveryForCycle {
                cycle_id: required_integer(args, ARG_CYCLE_ID)?,
            },
            GET_SLEEP_BY_ID => Self::GetSleepById {
                sleep_id: required_string(args, ARG_SLEEP_ID)?,
            },
            GET_SLEEP_COLLECTION => Self::GetSleepCollection(pagination(args)?),
            GET_WORKOUT_BY_ID => Self::GetWorkoutById {
                workout_id: required_string(args, ARG_WORKOUT_ID)?,
            },
            GET_WORKOUT_COLLECTION => Self::GetWorkoutCollection(pagination(args)?),
            GET_AUTHORIZATION_URL => Self::GetAuthorizationUrl,
            EXCHANGE_CODE_FOR_TOKEN => Self::ExchangeCodeForToken {
                code: required_string(args, ARG_CODE)?,
            },
            REFRESH_TOKEN => Self::RefreshToken {
                refresh_token: required_string(args, ARG_REFRESH_TOKEN)?,
            },
            SET_ACCESS_TOKEN => Self::SetAccessToken {
                access_token: required_string(args, ARG_ACCESS_TOKEN)?,
            },
            other => return Err(ToolError::unknown_tool(other)),
        };
        Ok(tool)
    }

    /// Registered tool name of this call
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetUserProfile => GET_USER_PROFILE,
            Self::GetUserBodyMeasurements => GET_USER_BODY_MEASUREMENTS,
            Self::RevokeUserAccess => REVOKE_USER_ACCESS,
            Self::GetCycleById { .. } => GET_CYCLE_BY_ID,
            Self::GetCycleCollection(_) => GET_CYCLE_COLLECTION,
            Self::GetSleepForCycle { .. } => GET_SLEEP_FOR_CYCLE,
            Self::GetRecoveryCollection(_) => GET_RECOVERY_COLLECTION,
            Self::GetRecoveryForCycle { .. } => GET_RECOVERY_FOR_CYCLE,
            Self::GetSleepById { .. } => GET_SLEEP_BY_ID,
            Self::GetSleepCollection(_) => GET_SLEEP_COLLECTION,
            Self::GetWorkoutById { .. } => GET_WORKOUT_BY_ID,
            Self::GetWorkoutCollection(_) => GET_WORKOUT_COLLECTION,
            Self::GetAuthorizationUrl => GET_AUTHORIZATION_URL,
            Self::ExchangeCodeForToken { .. } => EXCHANGE_CODE_FOR_TOKEN,
            Self::RefreshToken { .. } => REFRESH_TOKEN,
            Self::SetAccessToken { .. } => SET_ACCESS_TOKEN,
        }
    }
}

fn required_integer(args: &Map<String, Value>, name: &str) -> Result<i64, ToolError> {
    args.get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| ToolError::missing_parameter(name, "number"))
}

fn required_string(args: &Map<String, Value>, name: &str) -> Result<String, ToolError> {
    args.get(name)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ToolError::missing_parameter(name, "string"))
}

fn optional_string(args: &Map<String, Value>, name: &str) -> Result<Option<String>, ToolError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::invalid_parameter(name, "must be a string")),
    }
}

fn optional_limit(args: &Map<String, Value>) -> Result<Option<u32>, ToolError> {
    match args.get(ARG_LIMIT) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                ToolError::invalid_parameter(ARG_LIMIT, "must be a non-negative integer")
            }),
    }
}

fn pagination(args: &Map<String, Value>) -> Result<PaginationParams, ToolError> {
    Ok(PaginationParams {
        limit: optional_limit(args)?,
        start: optional_string(args, ARG_START)?,
        end: optional_string(args, ARG_END)?,
        next_token: optional_string(args, ARG_NEXT_TOKEN)?,
    })
}
