// ABOUTME: HTML page rendering for the local WHOOP OAuth callback server
// ABOUTME: Fills the start, success, and error templates with escaped values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use html_escape::{encode_double_quoted_attribute, encode_text};
use whoop_core::errors::OAuthError;
use whoop_core::models::UserProfile;

/// Template renderer for OAuth start, success and error pages
pub struct OAuthTemplateRenderer;

impl OAuthTemplateRenderer {
    /// Page linking to the WHOOP authorization URL
    #[must_use]
    pub fn render_start_template(authorization_url: &str) -> String {
        const TEMPLATE: &str = include_str!("../../templates/auth_start.html");

        fill(
            TEMPLATE,
            &[("AUTH_URL", &encode_double_quoted_attribute(authorization_url))],
        )
    }

    /// Page shown once tokens are saved; greets the member when the profile is known
    #[must_use]
    pub fn render_success_template(profile: Option<&UserProfile>, token_file: &str) -> String {
        const TEMPLATE: &str = include_str!("../../templates/oauth_success.html");

        let greeting = profile.map_or_else(
            || "You are connected to WHOOP.".to_owned(),
            |p| format!("Welcome, {}!", p.display_name()),
        );

        fill(
            TEMPLATE,
            &[
                ("GREETING", &encode_text(&greeting)),
                ("TOKEN_FILE", &encode_text(token_file)),
            ],
        )
    }

    /// Page for a failed callback
    #[must_use]
    pub fn render_error_template(error: &OAuthError) -> String {
        match error {
            OAuthError::StateMismatch | OAuthError::NoActiveSession => Self::render_failure(
                "Security Error",
                &error.to_string(),
                Some("This could be a security issue. Please try again."),
            ),
            OAuthError::ProviderDenied { error, description } => Self::render_failure(
                "OAuth Error",
                error,
                Some(description.as_deref().unwrap_or("No description")),
            ),
            OAuthError::MissingCode => {
                Self::render_failure("WHOOP OAuth Callback", &error.to_string(), None)
            }
            _ => Self::render_failure("Authentication Failed", &error.to_string(), None),
        }
    }

    /// Generic failure page
    #[must_use]
    pub fn render_failure(title: &str, message: &str, description: Option<&str>) -> String {
        const TEMPLATE: &str = include_str!("../../templates/oauth_error.html");

        let description_html = description
            .map(|d| {
                format!(
                    "<div class=\"description\"><strong>Description:</strong> {}</div>",
                    encode_text(d)
                )
            })
            .unwrap_or_default();

        fill(
            TEMPLATE,
            &[
                ("TITLE", &encode_text(title)),
                ("ERROR", &encode_text(message)),
                ("DESCRIPTION", &description_html),
            ],
        )
    }
}

/// Substitute `{{NAME}}` placeholders in one left-to-right pass.
///
/// Inserted values are never scanned again, so a value that itself looks like
/// a placeholder is emitted as is. Unknown placeholders are left untouched.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let value = after.find("}}").and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        if let Some((value, close)) = value {
            out.push_str(value);
            rest = &after[close + 2..];
        } else {
            out.push_str("{{");
            rest = after;
        }
    }
    out.push_str(rest);
    out
}
