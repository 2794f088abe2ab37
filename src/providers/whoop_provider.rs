// ABOUTME: Authenticated WHOOP API v2 client with one method per remote resource
// ABOUTME: Injects the current bearer token, passes pagination through, and surfaces non-2xx responses verbatim
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};
use url::Url;
use whoop_core::constants::endpoints;
use whoop_core::errors::{ApiError, OAuthError};
use whoop_core::models::{
    BodyMeasurements, Cycle, Recovery, Sleep, TokenPair, UserProfile, Workout,
};
use whoop_core::pagination::{Collection, PaginationParams};

use crate::config::ApiConfig;
use crate::logging::redact_token;
use crate::oauth2_client::{OAuth2Client, OAuth2Config, TokenExchanger};
use crate::utils::http_client::shared_client;

/// Immutable view of the credentials used for one request
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_token: Option<String>,
}

impl Credentials {
    /// Bearer token, if one has been set
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

/// WHOOP API v2 client
///
/// The access token lives in an [`Arc<Credentials>`] snapshot behind a lock.
/// Each request clones the current snapshot, so a concurrent
/// [`set_access_token`](Self::set_access_token) never changes a request that
/// is already being built.
pub struct WhoopApiClient {
    config: ApiConfig,
    oauth: OAuth2Client,
    credentials: RwLock<Arc<Credentials>>,
    client: Client,
}

impl WhoopApiClient {
    /// Create a client using the shared HTTP client
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Create a client with an explicit HTTP client
    #[must_use]
    pub fn with_http_client(config: ApiConfig, client: Client) -> Self {
        let oauth =
            OAuth2Client::with_http_client(OAuth2Config::from_api_config(&config), client.clone());
        Self {
            config,
            oauth,
            credentials: RwLock::new(Arc::new(Credentials::default())),
            client,
        }
    }

    /// Configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// OAuth client sharing this client's configuration
    #[must_use]
    pub const fn oauth(&self) -> &OAuth2Client {
        &self.oauth
    }

    /// Replace the access token used for every later request. No validation.
    pub async fn set_access_token(&self, token: impl Into<String>) {
        let token = token.into();
        debug!(token = %redact_token(&token), "Access token replaced");
        *self.credentials.write().await = Arc::new(Credentials {
            access_token: Some(token),
        });
    }

    /// Forget the access token
    pub async fn clear_access_token(&self) {
        *self.credentials.write().await = Arc::new(Credentials::default());
    }

    /// Current access token, if any
    pub async fn access_token(&self) -> Option<String> {
        self.credentials.read().await.access_token.clone()
    }

    async fn credentials(&self) -> Arc<Credentials> {
        Arc::clone(&*self.credentials.read().await)
    }

    // ------------------------------------------------------------------
    // OAuth
    // ------------------------------------------------------------------

    /// Authorization URL, with `state` appended when given
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization endpoint is not a URL
    pub fn get_authorization_url(&self, state: Option<&str>) -> Result<String, OAuthError> {
        self.oauth.get_authorization_url(state)
    }

    /// Authorization-code grant. Does not change the stored access token.
    ///
    /// # Errors
    ///
    /// Returns an error if WHOOP rejects the code or cannot be reached
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<TokenPair, OAuthError> {
        self.oauth.exchange_code(code).await
    }

    /// Refresh-token grant. Does not change the stored access token.
    ///
    /// # Errors
    ///
    /// Returns an error if WHOOP rejects the refresh token or cannot be reached
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, OAuthError> {
        self.oauth.refresh_token(refresh_token).await
    }

    // ------------------------------------------------------------------
    // User
    // ------------------------------------------------------------------

    /// Basic profile of the authenticated member
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_user_profile"))]
    pub async fn get_user_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json(ResourceRequest::UserProfile).await
    }

    /// Body measurements of the authenticated member
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_user_body_measurements"))]
    pub async fn get_user_body_measurements(&self) -> Result<BodyMeasurements, ApiError> {
        self.get_json(ResourceRequest::BodyMeasurements).await
    }

    /// Revoke the access the member granted to this application
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "revoke_user_access"))]
    pub async fn revoke_user_access(&self) -> Result<(), ApiError> {
        self.send(Method::DELETE, endpoints::USER_ACCESS, &[], None).await?;
        info!("WHOOP user access revoked");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cycles
    // ------------------------------------------------------------------

    /// Single cycle
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_cycle_by_id"))]
    pub async fn get_cycle_by_id(&self, cycle_id: i64) -> Result<Cycle, ApiError> {
        self.get_json(ResourceRequest::Cycle(cycle_id)).await
    }

    /// One page of cycles
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_cycle_collection"))]
    pub async fn get_cycle_collection(
        &self,
        params: &PaginationParams,
    ) -> Result<Collection<Cycle>, ApiError> {
        self.get_json(ResourceRequest::Cycles(params)).await
    }

    /// Sleep belonging to a cycle
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_sleep_for_cycle"))]
    pub async fn get_sleep_for_cycle(&self, cycle_id: i64) -> Result<Sleep, ApiError> {
        self.get_json(ResourceRequest::SleepForCycle(cycle_id)).await
    }

    // ------------------------------------------------------------------
    // Recovery
    // ------------------------------------------------------------------

    /// One page of recoveries
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_recovery_collection"))]
    pub async fn get_recovery_collection(
        &self,
        params: &PaginationParams,
    ) -> Result<Collection<Recovery>, ApiError> {
        self.get_json(ResourceRequest::Recoveries(params)).await
    }

    /// Recovery belonging to a cycle
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_recovery_for_cycle"))]
    pub async fn get_recovery_for_cycle(&self, cycle_id: i64) -> Result<Recovery, ApiError> {
        self.get_json(ResourceRequest::RecoveryForCycle(cycle_id)).await
    }

    // ------------------------------------------------------------------
    // Sleep
    // ------------------------------------------------------------------

    /// Single sleep
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_sleep_by_id"))]
    pub async fn get_sleep_by_id(&self, sleep_id: &str) -> Result<Sleep, ApiError> {
        self.get_json(ResourceRequest::Sleep(sleep_id)).await
    }

    /// One page of sleeps
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_sleep_collection"))]
    pub async fn get_sleep_collection(
        &self,
        params: &PaginationParams,
    ) -> Result<Collection<Sleep>, ApiError> {
        self.get_json(ResourceRequest::Sleeps(params)).await
    }

    // ------------------------------------------------------------------
    // Workouts
    // ------------------------------------------------------------------

    /// Single workout
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_workout_by_id"))]
    pub async fn get_workout_by_id(&self, workout_id: &str) -> Result<Workout, ApiError> {
        self.get_json(ResourceRequest::Workout(workout_id)).await
    }

    /// One page of workouts
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response or transport failure
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_workout_collection"))]
    pub async fn get_workout_collection(
        &self,
        params: &PaginationParams,
    ) -> Result<Collection<Workout>, ApiError> {
        self.get_json(ResourceRequest::Workouts(params)).await
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    fn endpoint_url(&self, endpoint: &str, ids: &[&str]) -> Result<Url, ApiError> {
        let base = &self.config.endpoints.api_base_url;
        let mut url = Url::parse(base).map_err(|e| ApiError::Transport {
            message: format!("Invalid WHOOP API base URL {base}: {e}"),
        })?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Transport {
                message: format!("WHOOP API base URL {base} cannot carry a path"),
            })?
            .pop_if_empty()
            .extend(endpoint.split('/'))
            .extend(ids);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        ids: &[&str],
        params: Option<&PaginationParams>,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint_url(endpoint, ids)?;
        let credentials = self.credentials().await;
        debug!(%method, path = url.path(), "Starting WHOOP API request");

        let mut request = self.client.request(method, url);
        if let Some(params) = params {
            request = request.query(&params.query_pairs());
        }
        match credentials.access_token() {
            Some(token) => request = request.header("Authorization", format!("Bearer {token}")),
            None => warn!("No WHOOP access token set; sending request unauthenticated"),
        }

        let response = request.send().await.map_err(|e| ApiError::Transport {
            message: e.to_string(),
        })?;

        let status = response.status();
        debug!("WHOOP API response status: {status}");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            status = status.as_u16(),
            body_length = body.len(),
            "WHOOP API request failed"
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Response body of a read endpoint exactly as WHOOP sent it
    ///
    /// Explicit `null`s and fields the typed models do not know survive, so
    /// this is what tool results are rendered from.
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx response, transport failure, or a body
    /// that is not JSON
    #[instrument(skip(self), fields(provider = "whoop", api_call = "get_raw"))]
    pub async fn get_raw(&self, resource: ResourceRequest<'_>) -> Result<Value, ApiError> {
        let (endpoint, ids) = resource.route();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let response = self.send(Method::GET, endpoint, &ids, resource.pagination()).await?;
        let bytes = response.bytes().await.map_err(|e| ApiError::Transport {
            message: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }

    async fn get_json<T>(&self, resource: ResourceRequest<'_>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let raw = self.get_raw(resource).await?;
        serde_json::from_value(raw).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}

/// A WHOOP read endpoint together with its path and query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRequest<'a> {
    /// `GET /user/profile/basic`
    UserProfile,
    /// `GET /user/measurement/body`
    BodyMeasurements,
    /// `GET /cycle/{id}`
    Cycle(i64),
    /// `GET /cycle`
    Cycles(&'a PaginationParams),
    /// `GET /cycle/{id}/sleep`
    SleepForCycle(i64),
    /// `GET /recovery`
    Recoveries(&'a PaginationParams),
    /// `GET /cycle/{id}/recovery`
    RecoveryForCycle(i64),
    /// `GET /activity/sleep/{id}`
    Sleep(&'a str),
    /// `GET /activity/sleep`
    Sleeps(&'a PaginationParams),
    /// `GET /activity/workout/{id}`
    Workout(&'a str),
    /// `GET /activity/workout`
    Workouts(&'a PaginationParams),
}

impl ResourceRequest<'_> {
    fn route(&self) -> (&'static str, Vec<String>) {
        match *self {
            Self::UserProfile => (endpoints::USER_PROFILE, Vec::new()),
            Self::BodyMeasurements => (endpoints::BODY_MEASUREMENT, Vec::new()),
            Self::Cycle(id) => (endpoints::CYCLE, vec![id.to_string()]),
            Self::SleepForCycle(id) => {
                (endpoints::CYCLE, vec![id.to_string(), "sleep".to_owned()])
            }
            Self::RecoveryForCycle(id) => {
                (endpoints::CYCLE, vec![id.to_string(), "recovery".to_owned()])
            }
            Self::Sleep(id) => (endpoints::SLEEP, vec![id.to_owned()]),
            Self::Workout(id) => (endpoints::WORKOUT, vec![id.to_owned()]),
            Self::Cycles(_) => (endpoints::CYCLE, Vec::new()),
            Self::Recoveries(_) => (endpoints::RECOVERY, Vec::new()),
            Self::Sleeps(_) => (endpoints::SLEEP, Vec::new()),
            Self::Workouts(_) => (endpoints::WORKOUT, Vec::new()),
        }
    }

    const fn pagination(&self) -> Option<&PaginationParams> {
        match *self {
            Self::Cycles(params)
            | Self::Recoveries(params)
            | Self::Sleeps(params)
            | Self::Workouts(params) => Some(params),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WhoopEndpoints;

    fn client_with_base(base: &str) -> WhoopApiClient {
        let config = ApiConfig::new("id", "secret", "http://localhost:3000/callback")
            .with_endpoints(WhoopEndpoints::with_base(base));
        WhoopApiClient::new(config)
    }

    #[test]
    fn test_endpoint_url_joins_segments() {
        let client = client_with_base("https://whoop.example.com/");
        let url = client
            .endpoint_url(endpoints::CYCLE, &["93845", "recovery"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://whoop.example.com/developer/v2/cycle/93845/recovery"
        );
    }

    #[test]
    fn test_endpoint_url_encodes_ids() {
        let client = client_with_base("https://whoop.example.com");
        let url = client.endpoint_url(endpoints::SLEEP, &["a/b c"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://whoop.example.com/developer/v2/activity/sleep/a%2Fb%20c"
        );
    }

    #[tokio::test]
    async fn test_set_and_clear_access_token() {
        let client = client_with_base("https://whoop.example.com");
        assert!(client.access_token().await.is_none());

        client.set_access_token("first").await;
        client.set_access_token("second").await;
        assert_eq!(client.access_token().await.as_deref(), Some("second"));

        client.clear_access_token().await;
        assert!(client.access_token().await.is_none());
    }
}
