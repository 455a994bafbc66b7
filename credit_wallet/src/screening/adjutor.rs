//! Adjutor karma blacklist client.

use super::Screener;
use super::errors::{ScreeningError, ScreeningResult};
use super::models::{ApiEnvelope, KarmaLookup, KarmaReport};
use async_trait::async_trait;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Adjutor karma verification API
pub struct AdjutorClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AdjutorClient {
    /// Create a new Adjutor client
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base URL, without a trailing slash
    /// * `api_key` - Bearer token for the Adjutor API
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

/// Turn a provider envelope into a verdict.
///
/// The provider signals success through the envelope's `status` field; an
/// unsuccessful or empty envelope yields an error rather than an implicit
/// all-clear, so callers stay fail-closed.
fn report_from_envelope(envelope: ApiEnvelope<KarmaLookup>) -> ScreeningResult<KarmaReport> {
    if envelope.status.is_empty() {
        return Err(ScreeningError::MalformedResponse(
            "missing envelope status".to_string(),
        ));
    }
    if !envelope.status.eq_ignore_ascii_case("success") {
        return Err(ScreeningError::Api {
            status: 200,
            message: envelope.message,
        });
    }

    match envelope.data {
        Some(lookup) => Ok(lookup.into()),
        None => Err(ScreeningError::MalformedResponse(
            "success envelope without data".to_string(),
        )),
    }
}

#[async_trait]
impl Screener for AdjutorClient {
    async fn check_email(&self, email: &str) -> ScreeningResult<KarmaReport> {
        let url = format!("{}/verification/karma/{}", self.base_url, email);

        tracing::debug!(email = %email, "karma lookup");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                email = %email,
                status = status.as_u16(),
                "karma lookup rejected"
            );
            return Err(ScreeningError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<KarmaLookup> = response.json().await?;
        let report = report_from_envelope(envelope)?;

        tracing::debug!(
            email = %email,
            clear = report.is_clear(),
            "karma lookup completed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_envelope(json: &str) -> ApiEnvelope<KarmaLookup> {
        serde_json::from_str(json).expect("envelope should parse")
    }

    #[test]
    fn test_clear_identity_parses_to_clear_report() {
        let envelope = parse_envelope(
            r#"{
                "status": "success",
                "message": "Successful",
                "data": {
                    "karma_identity": "user@example.com",
                    "amount_in_contention": "0.00",
                    "reason": null
                }
            }"#,
        );

        let report = report_from_envelope(envelope).expect("verdict expected");
        assert!(report.is_clear());
        assert_eq!(report.identity, "user@example.com");
    }

    #[test]
    fn test_flagged_identity_keeps_reason() {
        let envelope = parse_envelope(
            r#"{
                "status": "success",
                "message": "Successful",
                "data": {
                    "karma_identity": "bad@example.com",
                    "amount_in_contention": "5000.00",
                    "reason": "Loan default",
                    "karma_type": { "karma": "Others" }
                }
            }"#,
        );

        let report = report_from_envelope(envelope).expect("verdict expected");
        assert!(!report.is_clear());
        assert_eq!(report.reason.as_deref(), Some("Loan default"));
    }

    #[test]
    fn test_unsuccessful_envelope_is_an_error() {
        let envelope = parse_envelope(
            r#"{ "status": "error", "message": "Invalid key", "data": null }"#,
        );
        assert!(matches!(
            report_from_envelope(envelope),
            Err(ScreeningError::Api { .. })
        ));

        let envelope = parse_envelope(
            r#"{ "status": "success", "message": "Successful", "data": null }"#,
        );
        assert!(matches!(
            report_from_envelope(envelope),
            Err(ScreeningError::MalformedResponse(_))
        ));
    }
}
