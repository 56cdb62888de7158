//! HTTP client for the facility-count endpoint, using [`reqwest`].

use std::time::Duration;

use recwatch_core::occupancy::RawRecord;
use serde_json::Value;

/// Public facility-count endpoint polled when no `UPSTREAM_URL` is configured.
pub const DEFAULT_URL: &str = "https://goboardapi.azurewebsites.net/api/FacilityCount/\
     GetCountsByAccount?AccountAPIKey=D2A34F88-54D5-472A-8325-8B3E15C1B5EE";

/// Total time allowed for one fetch, body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the upstream API layer.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Upstream API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not a JSON array or object of location records.
    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// `true` when the API answered but with an unusable body, `false` when
    /// it could not be reached or refused the request.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// HTTP client for the facility-count API.
pub struct FacilityCountClient {
    client: reqwest::Client,
    url: String,
}

impl FacilityCountClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    /// Fetch the current counts for every location.
    ///
    /// Never retries. A failed or slow request surfaces as
    /// [`UpstreamError::Request`] or [`UpstreamError::Status`]; an unexpected
    /// body as [`UpstreamError::Malformed`].
    pub async fn fetch_counts(&self) -> Result<Vec<RawRecord>, UpstreamError> {
        let response = self.client.get(&self.url).send().await?;
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;

        let records = parse_records(&body)?;
        tracing::debug!(records = records.len(), "Fetched upstream facility counts");
        Ok(records)
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or [`UpstreamError::Status`] with the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Parse an upstream body into records.
///
/// A JSON array is parsed element by element; a single JSON object becomes a
/// one-element list. Anything else is [`UpstreamError::Malformed`].
pub fn parse_records(body: &[u8]) -> Result<Vec<RawRecord>, UpstreamError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Malformed(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(UpstreamError::Malformed(format!(
                "expected a JSON array or object, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| UpstreamError::Malformed(format!("record {i}: {e}")))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_array_of_records() {
        let body = br#"[
            {"LocationName": "HSC Cardio", "TotalCapacity": 40, "LastCount": 10},
            {"LocationName": "PED Pool", "TotalCapacity": 20, "CountOfParticipants": 4}
        ]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].count(), 10);
        assert_eq!(records[1].count(), 4);
    }

    #[test]
    fn single_object_becomes_one_element_list() {
        let body = br#"{"LocationName": "HSC Cardio", "TotalCapacity": 40, "LastCount": 10}"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location_name.as_deref(), Some("HSC Cardio"));
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_records(b"[]").unwrap().is_empty());
    }

    #[test]
    fn null_fields_are_tolerated() {
        let body = br#"[{"LocationName": null, "TotalCapacity": null, "LastCount": null}]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records[0].count(), 0);
        assert_eq!(records[0].capacity(), 0);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_records(b"<html>oops</html>").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn scalar_json_is_malformed() {
        assert_matches!(
            parse_records(b"42"),
            Err(UpstreamError::Malformed(msg)) if msg.contains("a number")
        );
    }

    #[test]
    fn wrongly_typed_record_is_malformed() {
        let body = br#"[{"LocationName": "HSC Cardio"}, {"TotalCapacity": "lots"}]"#;
        assert_matches!(
            parse_records(body),
            Err(UpstreamError::Malformed(msg)) if msg.starts_with("record 1")
        );
    }
}
