//! Per-conversation state and the turn protocol against the assistant backend.
//!
//! A [`Session`] owns everything one conversation needs: the session identifier the
//! backend keys its slot-filling state by, the visible transcript, and the latest
//! slot, context, product and policy data. All of it is replaced from backend
//! responses; the session itself never decides which slot comes next.
//!
//! Submits are sequenced. [`Session::begin_submit`] hands out a [`PendingSubmit`]
//! tagged with a fresh sequence number and [`Session::apply_submit`] ignores any
//! outcome that is no longer the latest one issued, so a slow response can never
//! overwrite a newer one. [`Session::submit`] runs both halves back to back.

use crate::client::Backend;
use crate::error::{Error, Result};
use crate::message::Turn;
use crate::product::{Context, PolicyVerdict, Product};
use crate::request::{ApprovalRequest, SubmitRequest, SubmitResponse};
use crate::table::extract_products_from_text;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Shown in place of a reply when a submit round trip fails
pub const SUBMIT_FAILURE_MESSAGE: &str = "❌ Failed to connect to the server";

/// Shown when the approval link cannot be obtained
pub const APPROVAL_FAILURE_MESSAGE: &str = "❌ Failed to generate approval link";

/// Status line after a reset
pub const RESET_MESSAGE: &str = "👋 Goodbye! The assistant has been reset.";

/// Where the conversation is in the slot-filling dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    /// No pending question; the next utterance starts or refines a request
    Idle,
    /// The backend asked for this slot and the next utterance answers it
    AwaitingSlot(String),
}

/// The single action offered for the best product
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The product passes policy and can be ordered directly
    Order,
    /// The product needs sign-off; `reason` is the backend's explanation
    MailApprover { reason: String },
}

/// Observable conversation state
///
/// Everything a presentation layer needs to draw the screen. Fields are replaced
/// from backend responses, never merged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    /// Visible transcript, oldest first
    pub transcript: Vec<Turn>,
    /// Slot the backend is waiting for, if any
    pub current_slot: Option<String>,
    pub context: Context,
    pub best_product: Option<Product>,
    pub policy: Option<PolicyVerdict>,
    pub products: Vec<Product>,
    /// Latest reply or notice, shown prominently by front ends
    pub status: Option<String>,
}

impl SessionState {
    /// Current position in the slot-filling dialogue
    pub fn slot_state(&self) -> SlotState {
        match &self.current_slot {
            Some(slot) => SlotState::AwaitingSlot(slot.clone()),
            None => SlotState::Idle,
        }
    }

    /// The action to offer for the best product
    ///
    /// Nothing is offered while the backend is still asking questions or when it
    /// has not picked a product. Otherwise exactly one action is offered: ordering
    /// if the policy verdict passes, mailing the approver if it fails or is missing.
    pub fn available_action(&self) -> Option<Action> {
        if self.current_slot.is_some() {
            return None;
        }
        self.best_product.as_ref()?;
        match &self.policy {
            Some(verdict) if verdict.passes => Some(Action::Order),
            Some(verdict) => Some(Action::MailApprover {
                reason: verdict.reason.clone(),
            }),
            None => Some(Action::MailApprover {
                reason: String::new(),
            }),
        }
    }
}

/// A submit that has been issued but whose outcome has not been applied yet
#[derive(Debug, Clone)]
pub struct PendingSubmit {
    /// Sequence number of this submit within the session
    pub seq: u64,
    /// What goes on the wire
    pub request: SubmitRequest,
}

/// How a submit affected the session
#[derive(Debug, Clone, PartialEq)]
pub enum TurnResult {
    /// The backend answered and the session now reflects its response
    Replied {
        /// The reply text
        reply: String,
        /// Dialogue position after the reply
        slot: SlotState,
    },
    /// The round trip failed; only the failure notice was recorded
    Failed {
        /// Description of what went wrong
        error: String,
    },
    /// A newer submit or a reset superseded this one; nothing changed
    Discarded {
        /// Sequence number of the discarded submit
        seq: u64,
    },
}

/// One conversation with the assistant backend
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> buying_assistant::Result<()> {
/// use buying_assistant::{HttpBackend, Session, TurnResult};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(30))?;
/// let mut session = Session::new(Arc::new(backend));
///
/// match session.submit("I need a laptop for college work under $500").await? {
///     TurnResult::Replied { reply, .. } => println!("Assistant: {}", reply),
///     TurnResult::Failed { error } => eprintln!("{}", error),
///     TurnResult::Discarded { .. } => {}
/// }
///
/// if let Some(action) = session.state().available_action() {
///     println!("Offered: {:?}", action);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Session {
    id: String,
    backend: Arc<dyn Backend>,
    state: SessionState,
    /// Sequence number of the most recently issued submit
    latest_seq: u64,
}

impl Session {
    /// Start a session with a freshly generated identifier
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_id(backend, Uuid::new_v4().to_string())
    }

    /// Start a session under a known identifier
    pub fn with_id(backend: Arc<dyn Backend>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            backend,
            state: SessionState::default(),
            latest_seq: 0,
        }
    }

    /// Identifier sent with every request
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current observable state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Submit one utterance and apply the backend's answer
    ///
    /// Transport and decoding failures do not surface as `Err`: they are recorded
    /// as a failure notice in the transcript and reported as
    /// [`TurnResult::Failed`], leaving slot, context and product state alone.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] - If the utterance is empty after trimming
    pub async fn submit(&mut self, utterance: &str) -> Result<TurnResult> {
        let pending = self.begin_submit(utterance)?;
        let outcome = self.backend.submit(&pending.request).await;
        Ok(self.apply_submit(pending, outcome))
    }

    /// Issue a submit without sending it
    ///
    /// The returned request carries the trimmed utterance, the session id and the
    /// slot currently awaited. Issuing supersedes every earlier pending submit.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] - If the utterance is empty after trimming
    pub fn begin_submit(&mut self, utterance: &str) -> Result<PendingSubmit> {
        let input = utterance.trim();
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        self.latest_seq += 1;
        let pending = PendingSubmit {
            seq: self.latest_seq,
            request: SubmitRequest {
                input: input.to_string(),
                session_id: self.id.clone(),
                current_slot: self.state.current_slot.clone(),
            },
        };
        tracing::debug!(
            session = %self.id,
            seq = pending.seq,
            slot = ?pending.request.current_slot,
            "submit issued"
        );
        Ok(pending)
    }

    /// Apply the outcome of a previously issued submit
    pub fn apply_submit(
        &mut self,
        pending: PendingSubmit,
        outcome: Result<SubmitResponse>,
    ) -> TurnResult {
        if pending.seq != self.latest_seq {
            tracing::debug!(
                session = %self.id,
                seq = pending.seq,
                latest = self.latest_seq,
                "discarding superseded response"
            );
            return TurnResult::Discarded { seq: pending.seq };
        }

        match outcome {
            Ok(response) => self.ingest(pending.request.input, response),
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "submit failed");
                self.state
                    .transcript
                    .push(Turn::exchange(pending.request.input, SUBMIT_FAILURE_MESSAGE));
                self.state.status = Some(SUBMIT_FAILURE_MESSAGE.to_string());
                TurnResult::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn ingest(&mut self, input: String, response: SubmitResponse) -> TurnResult {
        let verdict = response.verdict();
        let SubmitResponse {
            response: reply,
            current_slot,
            context,
            best_product,
            products,
            history,
            intent,
            ..
        } = response;
        let context = context.unwrap_or_default();

        // Structured products win; the reply table is only a fallback.
        let products = match products {
            Some(products) => products,
            None => extract_products_from_text(&reply),
        };

        match history {
            Some(history) => self.state.transcript = history,
            None => self.state.transcript.push(
                Turn::exchange(input, reply.clone())
                    .with_intent(intent)
                    .with_context(context.clone()),
            ),
        }

        self.state.current_slot = current_slot;
        self.state.context = context;
        self.state.best_product = best_product;
        self.state.policy = verdict;
        self.state.products = products;
        self.state.status = Some(reply.clone());

        TurnResult::Replied {
            reply,
            slot: self.state.slot_state(),
        }
    }

    /// Ask the backend for an approval compose link
    ///
    /// Returns the link on success. On failure a notice is appended to the
    /// transcript and `None` is returned; no other state changes either way.
    pub async fn request_approval(&mut self) -> Option<String> {
        let request = ApprovalRequest {
            session_id: self.id.clone(),
        };
        match self.backend.request_approval(&request).await {
            Ok(approval) => {
                tracing::debug!(session = %self.id, "approval link received");
                Some(approval.mailto_link)
            }
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "approval request failed");
                self.state
                    .transcript
                    .push(Turn::assistant(APPROVAL_FAILURE_MESSAGE));
                self.state.status = Some(APPROVAL_FAILURE_MESSAGE.to_string());
                None
            }
        }
    }

    /// Confirm an order for the best product
    ///
    /// Only possible when [`Action::Order`] is on offer. The confirmation is
    /// recorded in the transcript and returned.
    pub fn place_order(&mut self) -> Option<String> {
        if self.state.available_action() != Some(Action::Order) {
            return None;
        }
        let title = self.state.best_product.as_ref()?.title.clone();
        let confirmation = format!("✅ Order initiated for \"{}\"!", title);
        tracing::info!(session = %self.id, product = %title, "order initiated");
        self.state.transcript.push(Turn::assistant(confirmation.clone()));
        self.state.status = Some(confirmation.clone());
        Some(confirmation)
    }

    /// Clear the conversation but keep the session identifier
    ///
    /// Responses to submits issued before the reset are discarded when they arrive.
    /// The backend may still hold context under this identifier; use
    /// [`restart`](Self::restart) to start over on the server side as well.
    pub fn reset(&mut self) {
        self.latest_seq += 1;
        self.state = SessionState {
            status: Some(RESET_MESSAGE.to_string()),
            ..SessionState::default()
        };
        tracing::info!(session = %self.id, "session reset");
    }

    /// Clear the conversation and switch to a new session identifier
    pub fn restart(&mut self) {
        self.reset();
        self.id = Uuid::new_v4().to_string();
        tracing::info!(session = %self.id, "session restarted");
    }
}
