// ABOUTME: Cursor passthrough pagination for WHOOP collection endpoints
// ABOUTME: Query parameters forwarded verbatim and the collection page envelope returned by WHOOP
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};

use crate::constants::tools::{ARG_END, ARG_LIMIT, ARG_NEXT_TOKEN, ARG_START};

/// Query parameters accepted by every WHOOP collection endpoint.
///
/// Values are never interpreted locally: `start`/`end` are ISO 8601 strings and
/// `next_token` is an opaque cursor from a previous page. Unset fields, empty
/// strings and a zero `limit` are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Maximum records per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Inclusive range start (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Exclusive range end (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Cursor returned as `next_token` by the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl PaginationParams {
    /// First page with the given size
    #[must_use]
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Continue from a cursor
    #[must_use]
    pub fn next_page(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }

    /// Restrict to a time range
    #[must_use]
    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Query pairs in WHOOP's wire naming, skipping anything unset
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push((ARG_LIMIT, limit.to_string()));
        }
        let strings = [
            (ARG_START, &self.start),
            (ARG_END, &self.end),
            (ARG_NEXT_TOKEN, &self.next_token),
        ];
        for (name, value) in strings {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((name, value.to_owned()));
            }
        }
        pairs
    }

    /// Whether no parameter would be sent
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// One page of a WHOOP collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// Records on this page
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    /// Cursor for the following page, absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<T> Collection<T> {
    /// Whether WHOOP reported another page
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_params_produce_no_query() {
        let params = PaginationParams::default();
        assert!(params.query_pairs().is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_zero_limit_and_empty_strings_are_omitted() {
        let params = PaginationParams {
            limit: Some(0),
            start: Some(String::new()),
            end: None,
            next_token: Some("abc".to_owned()),
        };
        assert_eq!(params.query_pairs(), vec![("nextToken", "abc".to_owned())]);
    }

    #[test]
    fn test_params_keep_wire_order_and_values() {
        let params = PaginationParams::with_limit(10)
            .between("2024-01-01T00:00:00.000Z", "2024-02-01T00:00:00.000Z")
            .next_page("MTIzOjEyMzEyMw");
        assert_eq!(
            params.query_pairs(),
            vec![
                ("limit", "10".to_owned()),
                ("start", "2024-01-01T00:00:00.000Z".to_owned()),
                ("end", "2024-02-01T00:00:00.000Z".to_owned()),
                ("nextToken", "MTIzOjEyMzEyMw".to_owned()),
            ]
        );
    }

    #[test]
    fn test_collection_without_next_token_is_last_page() {
        let page: Collection<serde_json::Value> =
            serde_json::from_str(r#"{"records":[{"id":1}]}"#).unwrap();
        assert_eq!(page.records.len(), 1);
        assert!(!page.has_more());
    }
}
