//! Renderer-independent presentation of a session.
//!
//! Front ends draw from a [`SessionView`] instead of poking at raw state, which
//! keeps the action rules and number formatting identical across them.

use crate::message::Turn;
use crate::product::{Context, Product};
use crate::session::{Action, SessionState};

/// Placeholder shown when no question is pending
pub const EXAMPLE_REQUEST: &str = "e.g., I need a laptop for college work under $500";

/// One product formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub title: String,
    /// `$` amount with two decimals, blank when unknown
    pub price: String,
    /// Two decimals, blank when unknown
    pub match_score: String,
    pub availability: String,
    pub delivery_time: String,
    pub category: String,
    pub link: String,
    /// Whether this row is the backend's best pick
    pub best: bool,
}

/// What a front end should show for the current session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub status: Option<String>,
    pub rows: Vec<ProductRow>,
    pub action: Option<Action>,
    /// Policy explanation, only when approval is required and a reason exists
    pub policy_note: Option<String>,
    pub input_placeholder: String,
    pub submit_label: String,
}

impl SessionView {
    pub fn from_state(state: &SessionState) -> Self {
        let best_title = state.best_product.as_ref().map(|p| p.title.as_str());
        let rows = state
            .products
            .iter()
            .map(|p| ProductRow::new(p, best_title == Some(p.title.as_str())))
            .collect();

        let action = state.available_action();
        let policy_note = match &action {
            Some(Action::MailApprover { reason }) if !reason.is_empty() => Some(reason.clone()),
            _ => None,
        };

        let (input_placeholder, submit_label) = match &state.current_slot {
            Some(slot) => (format!("Enter {}", capitalize(slot)), "Submit Response".to_string()),
            None => (EXAMPLE_REQUEST.to_string(), "Submit".to_string()),
        };

        Self {
            status: state.status.clone(),
            rows,
            action,
            policy_note,
            input_placeholder,
            submit_label,
        }
    }
}

impl ProductRow {
    fn new(product: &Product, best: bool) -> Self {
        Self {
            title: product.title.clone(),
            price: format_price(product.price),
            match_score: format_score(product.match_score),
            availability: product.availability.clone(),
            delivery_time: product.delivery_time.clone(),
            category: product.category.clone(),
            link: product.link.clone(),
            best,
        }
    }
}

/// `$1234.50`, or an empty string for NaN and infinities
pub fn format_price(value: f64) -> String {
    if value.is_finite() {
        format!("${:.2}", value)
    } else {
        String::new()
    }
}

/// Two decimals, or an empty string for NaN and infinities
pub fn format_score(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        String::new()
    }
}

/// Summary of what the backend extracted at this turn
///
/// Only slot-filling turns with an item get one, e.g.
/// `Item = laptop, Budget = $500.00, Purpose = college work`.
pub fn context_summary(turn: &Turn) -> Option<String> {
    if !turn.is_extraction() {
        return None;
    }
    let context = turn.context.as_ref()?;
    summarize(context)
}

fn summarize(context: &Context) -> Option<String> {
    let item = context.item.as_deref().filter(|s| !s.is_empty())?;
    let mut summary = format!("Item = {}", item);
    if let Some(budget) = context.budget.filter(|b| *b != 0.0) {
        summary.push_str(&format!(", Budget = {}", format_price(budget)));
    }
    let fields = [
        ("Purpose", &context.purpose),
        ("Brand", &context.brand),
        ("Features", &context.features),
        ("Urgency", &context.urgency),
    ];
    for (label, value) in fields {
        if let Some(value) = value.as_deref().filter(|s| !s.is_empty()) {
            summary.push_str(&format!(", {} = {}", label, value));
        }
    }
    Some(summary)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
