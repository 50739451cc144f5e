//! Mock implementations for testing.
//!
//! [`MockHttpTransport`] stands in for the network: it replays queued
//! responses or routes requests through a handler, records every request, and
//! tracks how many requests were in flight at once.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::auth::AuthManager;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Builds a JSON response.
pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::from([("content-type".to_string(), "application/json".to_string())]),
        body: Bytes::from(body.to_string()),
    }
}

/// Mock HTTP transport for testing.
///
/// Queued responses are served first, in order; once the queue is empty the
/// handler (if any) answers. Without either, `send` fails with a connection error.
///
/// ```
/// use integrations_gemini_chat::mocks::MockHttpTransport;
/// use integrations_gemini_chat::transport::{HttpMethod, HttpRequest, HttpTransport};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// # #[tokio::main]
/// # async fn main() {
/// let transport = MockHttpTransport::new();
/// transport.enqueue_json_response(200, &json!({ "status": "ok" }));
///
/// let request = HttpRequest {
///     method: HttpMethod::Get,
///     url: "https://example.com".to_string(),
///     headers: HashMap::new(),
///     body: None,
///     timeout: None,
/// };
/// let response = transport.send(request).await.unwrap();
/// assert_eq!(response.status, 200);
/// transport.verify_request_count(1);
/// # }
/// ```
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    handler: Option<Box<Handler>>,
    requests: Mutex<Vec<HttpRequest>>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockHttpTransport {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            handler: None,
            requests: Mutex::new(Vec::new()),
            latency: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Answers requests with `handler` once the queue is drained.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Delays every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Enqueue a response to be returned by the next request.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Enqueue a JSON response with the given status code and body.
    pub fn enqueue_json_response(&self, status: u16, body: &Value) {
        self.enqueue_response(Ok(json_response(status, body)));
    }

    /// Enqueue a raw response.
    pub fn enqueue_raw_response(&self, status: u16, body: &str, headers: HashMap<String, String>) {
        self.enqueue_response(Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }));
    }

    /// Enqueue an error response.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// All requests made so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The last request that was made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Highest number of requests observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Verify that exactly `expected` requests were made.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.request_count();
        assert_eq!(actual, expected, "Expected {} requests, got {}", expected, actual);
    }

    /// Verify that a request was made with the expected method and URL.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "No request at index {}", index);

        let request = &requests[index];
        assert_eq!(request.method, method, "Expected method {:?}, got {:?}", method, request.method);
        assert!(
            request.url.contains(url_contains),
            "Expected URL to contain '{}', got '{}'",
            url_contains,
            request.url
        );
    }

    /// Verify that a request carries a header value (name matched ignoring case).
    pub fn verify_header(&self, index: usize, header_name: &str, header_value: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "No request at index {}", index);

        let actual = requests[index].header(header_name);
        assert_eq!(
            actual,
            Some(header_value),
            "Expected header '{}' to be '{}', got {:?}",
            header_name,
            header_value,
            actual
        );
    }

    fn next_response(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        if let Some(queued) = self.responses.lock().unwrap().pop_front() {
            return queued;
        }
        match &self.handler {
            Some(handler) => handler(request),
            None => Err(TransportError::Connection(
                "No response configured in MockHttpTransport".to_string(),
            )),
        }
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        self.requests.lock().unwrap().push(request.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let response = self.next_response(&request);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}

/// Mock authentication manager for testing.
///
/// ```
/// use integrations_gemini_chat::mocks::MockAuthManager;
/// use integrations_gemini_chat::auth::AuthManager;
///
/// let auth = MockAuthManager::new("test-api-key");
/// assert_eq!(
///     auth.get_auth_headers(),
///     vec![("x-goog-api-key".to_string(), "test-api-key".to_string())]
/// );
/// ```
#[derive(Clone)]
pub struct MockAuthManager {
    api_key: String,
    use_header: bool,
}

impl MockAuthManager {
    /// Header authentication with the given key.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: true,
        }
    }

    /// Query-parameter authentication with the given key.
    pub fn with_query_param(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: false,
        }
    }
}

impl AuthManager for MockAuthManager {
    fn get_auth_headers(&self) -> Vec<(String, String)> {
        if self.use_header {
            vec![("x-goog-api-key".to_string(), self.api_key.clone())]
        } else {
            Vec::new()
        }
    }

    fn get_auth_query_param(&self) -> Option<(String, String)> {
        (!self.use_header).then(|| ("key".to_string(), self.api_key.clone()))
    }
}
