use crate::error::{Error, Result};
use crate::request::{ApprovalRequest, ApprovalResponse, SubmitRequest, SubmitResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Path of the conversational endpoint, relative to the backend base URL
pub const SUBMIT_ENDPOINT: &str = "/api/submit";

/// Path of the approval endpoint, relative to the backend base URL
pub const APPROVAL_ENDPOINT: &str = "/api/approval";

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Transport seam between a session and the assistant backend
///
/// [`Session`](crate::Session) only ever talks to this trait, so presentation
/// layers and tests can swap the HTTP transport for anything that speaks the
/// same request/response shapes.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use buying_assistant::{
///     ApprovalRequest, ApprovalResponse, Backend, Result, SubmitRequest, SubmitResponse,
/// };
///
/// struct Echo;
///
/// #[async_trait]
/// impl Backend for Echo {
///     async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse> {
///         Ok(SubmitResponse {
///             response: format!("You said: {}", request.input),
///             ..Default::default()
///         })
///     }
///
///     async fn request_approval(&self, _request: &ApprovalRequest) -> Result<ApprovalResponse> {
///         Ok(ApprovalResponse { mailto_link: "mailto:approver@example.com".to_string() })
///     }
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send one user utterance and receive the backend's view of the conversation
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse>;

    /// Ask the backend for an approval compose link for the session's best product
    async fn request_approval(&self, request: &ApprovalRequest) -> Result<ApprovalResponse>;
}

/// HTTP client for the assistant backend
///
/// # Example
///
/// ```rust
/// use buying_assistant::HttpBackend;
/// use std::time::Duration;
///
/// let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(30)).unwrap();
/// assert_eq!(backend.base_url().as_str(), "http://localhost:5000/");
/// ```
#[derive(Clone)]
pub struct HttpBackend {
    /// HTTP client for making backend requests
    client: reqwest::Client,
    /// Root the endpoint paths are joined onto
    base_url: Url,
}

impl HttpBackend {
    /// Create a client for the backend rooted at `base_url`
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] - If the base URL does not parse
    /// - [`Error::Request`] - If the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Get the backend root URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// POST a JSON body and decode the JSON answer
    ///
    /// # Errors
    ///
    /// - [`Error::Request`] - If the HTTP request fails
    /// - [`Error::Response`] - If the backend returns a non-success status code
    /// - [`Error::Parse`] - If the response body can't be decoded
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        tracing::debug!(%url, "posting to assistant backend");
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // The backend reports failures as {"error": "..."}
            if let Ok(error_json) = serde_json::from_str::<Value>(&text) {
                if let Some(error_msg) = error_json.get("error").and_then(|e| e.as_str()) {
                    return Err(Error::Response(
                        error_msg.to_string(),
                        Some(status.as_u16()),
                    ));
                }
            }

            return Err(Error::Response(text, Some(status.as_u16())));
        }

        let response_text = response.text().await?;
        Ok(serde_json::from_str(&response_text)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse> {
        self.post(SUBMIT_ENDPOINT, request).await
    }

    async fn request_approval(&self, request: &ApprovalRequest) -> Result<ApprovalResponse> {
        self.post(APPROVAL_ENDPOINT, request).await
    }
}
