//! HTTP response parser for the Gemini API.

use serde::de::DeserializeOwned;
use std::collections::HashMap;

use super::http::HttpResponse;
use crate::error::{map_generation_failure, GeminiError, NetworkError, ResponseError};

/// Parser for HTTP responses from the Gemini API.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a 2xx response into `T`; other statuses become `NetworkError::UnexpectedStatus`.
    pub fn parse_response<T: DeserializeOwned>(
        response: &HttpResponse,
        operation: &str,
    ) -> Result<T, GeminiError> {
        if !response.is_success() {
            return Err(Self::unexpected_status(response, operation));
        }
        Self::parse_body(response)
    }

    /// Parses a generateContent response; failures keep the structured error payload.
    pub fn parse_generation_response<T: DeserializeOwned>(
        response: &HttpResponse,
    ) -> Result<T, GeminiError> {
        if !response.is_success() {
            return Err(map_generation_failure(response.status, &response.body));
        }
        Self::parse_body(response)
    }

    /// Deserializes the body regardless of status.
    pub fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, GeminiError> {
        serde_json::from_slice(&response.body).map_err(|e| {
            ResponseError::DeserializationError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Error for a non-success status outside the generation endpoint.
    pub fn unexpected_status(response: &HttpResponse, operation: &str) -> GeminiError {
        NetworkError::UnexpectedStatus {
            operation: operation.to_string(),
            status: response.status,
            body: response.body_text(),
        }
        .into()
    }

    /// Extracts the request ID from response headers for debugging.
    pub fn extract_request_id(headers: &HashMap<String, String>) -> Option<String> {
        let possible_headers = ["x-request-id", "x-goog-request-id", "request-id"];

        headers
            .iter()
            .find(|(key, _)| possible_headers.iter().any(|h| key.eq_ignore_ascii_case(h)))
            .map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct TestResponse {
        name: String,
        value: i32,
    }

    fn create_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_parse_successful_response() {
        let response = create_response(200, r#"{"name":"test","value":42}"#);
        let parsed: TestResponse = ResponseParser::parse_response(&response, "list files").unwrap();

        assert_eq!(parsed.name, "test");
        assert_eq!(parsed.value, 42);
    }

    #[test]
    fn test_unexpected_status_keeps_body() {
        let response = create_response(403, "forbidden");
        let error = ResponseParser::parse_response::<TestResponse>(&response, "upload start").unwrap_err();

        match error {
            GeminiError::Network(NetworkError::UnexpectedStatus { operation, status, body }) => {
                assert_eq!(operation, "upload start");
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_body_is_deserialization_error() {
        let response = create_response(200, "{not json");
        let error = ResponseParser::parse_response::<TestResponse>(&response, "get file").unwrap_err();

        assert!(matches!(
            error,
            GeminiError::Response(ResponseError::DeserializationError { .. })
        ));
    }

    #[test]
    fn test_generation_failure_is_structured() {
        let response = create_response(
            429,
            r#"{"error":{"code":429,"message":"Resource exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        );
        let error = ResponseParser::parse_generation_response::<TestResponse>(&response).unwrap_err();

        assert_eq!(error.failure().unwrap().payload.error.code, 429);
    }

    #[test]
    fn test_extract_request_id_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("X-Goog-Request-ID".to_string(), "goog123".to_string());

        assert_eq!(ResponseParser::extract_request_id(&headers), Some("goog123".to_string()));
        assert_eq!(ResponseParser::extract_request_id(&HashMap::new()), None);
    }
}
