/*!
A Rust client for a conversational procurement assistant.

The assistant backend runs a slot-filling dialogue: it asks follow-up questions
(budget, purpose, brand, features, urgency) until it can recommend products, then
says whether the best pick may be ordered directly or needs an approver. This
crate owns the client side of that protocol:

- Keep per-session conversation state consistent with the backend's answers
- Submit utterances together with the slot being answered
- Fall back to scraping the markdown product table when no structured list comes back
- Decide which action (order or mail approver) to offer
- Discard responses that a newer submit or a reset has superseded

## Quick Start

```rust,no_run
# async fn example() -> buying_assistant::Result<()> {
use buying_assistant::{Action, HttpBackend, Session};
use std::sync::Arc;
use std::time::Duration;

let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(30))?;
let mut session = Session::new(Arc::new(backend));

session.submit("I need a laptop for college work under $500").await?;
while let Some(slot) = session.state().current_slot.clone() {
    println!("Backend asks for: {}", slot);
    session.submit("no preference").await?;
}

match session.state().available_action() {
    Some(Action::Order) => { session.place_order(); }
    Some(Action::MailApprover { .. }) => {
        if let Some(link) = session.request_approval().await {
            println!("Open {}", link);
        }
    }
    None => {}
}
# Ok(())
# }
```

## Main Components

- [`Session`]: conversation state and the turn protocol
- [`Backend`]: transport seam, implemented over HTTP by [`HttpBackend`]
- [`SessionView`]: renderer-independent view of a session
- [`extract_products_from_text`]: markdown table fallback parser
*/

// Re-export main types from submodules
pub use client::{Backend, HttpBackend, APPROVAL_ENDPOINT, DEFAULT_BASE_URL, SUBMIT_ENDPOINT};
pub use config::Config;
pub use error::{Error, Result};
pub use message::Turn;
pub use product::{Context, PolicyVerdict, Product};
pub use request::{ApprovalRequest, ApprovalResponse, SubmitRequest, SubmitResponse};
pub use session::{
    Action, PendingSubmit, Session, SessionState, SlotState, TurnResult,
    APPROVAL_FAILURE_MESSAGE, RESET_MESSAGE, SUBMIT_FAILURE_MESSAGE,
};
pub use table::extract_products_from_text;
pub use view::{context_summary, ProductRow, SessionView};

// Modules
pub mod chat_ui;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod product;
pub mod request;
pub mod session;
pub mod table;
pub mod view;
