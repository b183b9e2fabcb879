use crate::product::Context;
use serde::{Deserialize, Serialize};

/// One entry of the conversation transcript
///
/// A turn pairs what the user said with the assistant's answer, plus the intent
/// tag and context snapshot the backend attached to it. Backend-supplied history
/// uses the same shape, so a whole transcript can be deserialized directly.
///
/// Entries created by local actions (ordering, approval failures) have no user
/// side.
///
/// # Example
///
/// ```rust
/// use buying_assistant::Turn;
///
/// let turn = Turn::exchange("I need a laptop", "What's your approximate budget?");
/// assert_eq!(turn.user.as_deref(), Some("I need a laptop"));
///
/// let notice = Turn::assistant("Order initiated");
/// assert!(notice.user.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// What the user typed, if this entry answers a user utterance
    #[serde(default)]
    pub user: Option<String>,
    /// The assistant's reply
    #[serde(default)]
    pub bot: String,
    /// Intent tag assigned by the backend (`initial`, `clarification`, ...)
    #[serde(default)]
    pub intent: Option<String>,
    /// Context snapshot taken when the turn was recorded
    #[serde(default)]
    pub context: Option<Context>,
}

impl Turn {
    /// Create a turn pairing a user utterance with a reply
    pub fn exchange(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            bot: bot.into(),
            intent: None,
            context: None,
        }
    }

    /// Create an assistant-only turn
    pub fn assistant(bot: impl Into<String>) -> Self {
        Self {
            user: None,
            bot: bot.into(),
            intent: None,
            context: None,
        }
    }

    /// Attach the backend's intent tag
    pub fn with_intent(mut self, intent: Option<String>) -> Self {
        self.intent = intent;
        self
    }

    /// Attach a context snapshot
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Whether the backend tagged this turn as part of slot filling
    ///
    /// Only those turns carry an extraction summary worth showing.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self.intent.as_deref(),
            Some("initial") | Some("clarification") | Some("purchase_request")
        )
    }
}
