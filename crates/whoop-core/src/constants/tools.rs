// ABOUTME: MCP tool name constants for the WHOOP tool surface
// ABOUTME: One constant per tool, shared by the schema list and the dispatcher
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

// User tools
/// Basic profile of the authenticated user
pub const GET_USER_PROFILE: &str = "whoop-get-user-profile";
/// Body measurements of the authenticated user
pub const GET_USER_BODY_MEASUREMENTS: &str = "whoop-get-user-body-measurements";
/// Revoke the access token granted by the user
pub const REVOKE_USER_ACCESS: &str = "whoop-revoke-user-access";

// Cycle tools
/// Single cycle by id
pub const GET_CYCLE_BY_ID: &str = "whoop-get-cycle-by-id";
/// Paginated cycles
pub const GET_CYCLE_COLLECTION: &str = "whoop-get-cycle-collection";
/// Sleep for a cycle
pub const GET_SLEEP_FOR_CYCLE: &str = "whoop-get-sleep-for-cycle";

// Recovery tools
/// Paginated recovery records
pub const GET_RECOVERY_COLLECTION: &str = "whoop-get-recovery-collection";
/// Recovery for a cycle
pub const GET_RECOVERY_FOR_CYCLE: &str = "whoop-get-recovery-for-cycle";

// Sleep tools
/// Single sleep by id
pub const GET_SLEEP_BY_ID: &str = "whoop-get-sleep-by-id";
/// Paginated sleep records
pub const GET_SLEEP_COLLECTION: &str = "whoop-get-sleep-collection";

// Workout tools
/// Single workout by id
pub const GET_WORKOUT_BY_ID: &str = "whoop-get-workout-by-id";
/// Paginated workouts
pub const GET_WORKOUT_COLLECTION: &str = "whoop-get-workout-collection";

// OAuth tools
/// Build the authorization URL
pub const GET_AUTHORIZATION_URL: &str = "whoop-get-authorization-url";
/// Exchange an authorization code for tokens
pub const EXCHANGE_CODE_FOR_TOKEN: &str = "whoop-exchange-code-for-token";
/// Refresh an access token
pub const REFRESH_TOKEN: &str = "whoop-refresh-token";
/// Set the access token used for API calls
pub const SET_ACCESS_TOKEN: &str = "whoop-set-access-token";

// Argument names
/// Cycle identifier (number)
pub const ARG_CYCLE_ID: &str = "cycleId";
/// Sleep identifier (string)
pub const ARG_SLEEP_ID: &str = "sleepId";
/// Workout identifier (string)
pub const ARG_WORKOUT_ID: &str = "workoutId";
/// Authorization code (string)
pub const ARG_CODE: &str = "code";
/// Refresh token (string)
pub const ARG_REFRESH_TOKEN: &str = "refreshToken";
/// Access token (string)
pub const ARG_ACCESS_TOKEN: &str = "accessToken";
/// Page size (number)
pub const ARG_LIMIT: &str = "limit";
/// Range start (ISO 8601 string)
pub const ARG_START: &str = "start";
/// Range end (ISO 8601 string)
pub const ARG_END: &str = "end";
/// Pagination cursor (string)
pub const ARG_NEXT_TOKEN: &str = "nextToken";
