use crate::message::Turn;
use crate::product::{Context, PolicyVerdict, Product};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/submit`
///
/// # Example
///
/// ```rust
/// use buying_assistant::SubmitRequest;
///
/// let request = SubmitRequest {
///     input: "I need a laptop for college work under $500".to_string(),
///     session_id: "3f1c0c1e-6a43-4c7e-9d55-0d8d1c7b9a10".to_string(),
///     current_slot: None,
/// };
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert!(body["current_slot"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The trimmed user utterance
    pub input: String,
    /// Session identifier the backend keys its state by
    pub session_id: String,
    /// Slot the utterance answers, or null for a fresh request
    pub current_slot: Option<String>,
}

/// Body returned by `POST /api/submit`
///
/// Clarification turns only carry `response`, `current_slot`, `context` and
/// `history`; the recommendation turn adds the product and policy fields. Every
/// field except `response` may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Free-text reply, possibly containing a markdown product table
    pub response: String,
    /// Next slot the backend wants filled
    #[serde(default)]
    pub current_slot: Option<String>,
    /// Full context snapshot
    #[serde(default)]
    pub context: Option<Context>,
    /// Backend's top pick
    #[serde(default)]
    pub best_product: Option<Product>,
    #[serde(default)]
    pub passes_policy: Option<bool>,
    #[serde(default)]
    pub policy_reason: Option<String>,
    /// Structured candidates; when present the reply table is not scraped
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    /// Authoritative transcript; when present it replaces the local one
    #[serde(default)]
    pub history: Option<Vec<Turn>>,
    #[serde(default)]
    pub intent: Option<String>,
}

impl SubmitResponse {
    /// Policy verdict carried by this response, if the backend evaluated one
    pub fn verdict(&self) -> Option<PolicyVerdict> {
        self.passes_policy.map(|passes| PolicyVerdict {
            passes,
            reason: self.policy_reason.clone().unwrap_or_default(),
        })
    }
}

/// Body of `POST /api/approval`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub session_id: String,
}

/// Body returned by `POST /api/approval`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalResponse {
    /// Compose link addressed to the approver, meant to be opened by the user
    pub mailto_link: String,
}

impl ApprovalResponse {
    /// Decoded subject line of the compose link, if it has one
    ///
    /// Handles both `mailto:` links (`subject=`) and web-mail compose links (`su=`).
    pub fn subject(&self) -> Option<String> {
        let url = url::Url::parse(&self.mailto_link).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "su" || key == "subject")
            .map(|(_, value)| value.into_owned())
    }
}
