use buying_assistant::{
    chat_ui::ChatUI, ApprovalResponse, Config, Error, HttpBackend, Result, Session, SessionView,
    TurnResult,
};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn render(ui: &ChatUI, session: &Session) {
    ui.print_view(&SessionView::from_state(session.state()));
}

async fn handle_submit(ui: &ChatUI, session: &mut Session, input: &str) {
    ui.print_message("user", input);
    let pb = ui.thinking("Assistant is thinking...");
    let result = session.submit(input).await;
    pb.finish_and_clear();

    match result {
        Ok(TurnResult::Replied { reply, .. }) => {
            ui.print_message("assistant", &reply);
            render(ui, session);
        }
        Ok(TurnResult::Failed { error }) => {
            if let Some(status) = &session.state().status {
                ui.print_message("assistant", status);
            }
            ui.print_error(&error);
        }
        Ok(TurnResult::Discarded { .. }) => {}
        Err(Error::EmptyInput) => {}
        Err(e) => ui.print_error(&e.to_string()),
    }
}

async fn handle_approval(ui: &ChatUI, session: &mut Session) {
    let pb = ui.thinking("Preparing approval email...");
    let link = session.request_approval().await;
    pb.finish_and_clear();

    match link {
        Some(mailto_link) => {
            let subject = ApprovalResponse {
                mailto_link: mailto_link.clone(),
            }
            .subject();
            ui.print_link(&mailto_link, subject.as_deref());
        }
        None => {
            if let Some(status) = &session.state().status {
                ui.print_message("assistant", status);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_filter);

    let backend = HttpBackend::new(&config.base_url, config.timeout)?;
    let mut session = Session::new(Arc::new(backend));

    let ui = ChatUI::new();
    ui.print_welcome(&config.base_url, session.id());

    loop {
        let view = SessionView::from_state(session.state());
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(&view.submit_label)
            .allow_empty(true)
            .report(false)
            .interact_text()
            .map_err(|e| Error::Other(format!("Failed to read input: {}", e)))?;

        let input_trimmed = input.trim();
        if input_trimmed.is_empty() {
            ui.print_notice(&view.input_placeholder);
            continue;
        }

        if input_trimmed.eq_ignore_ascii_case("exit")
            || input_trimmed.eq_ignore_ascii_case("quit")
        {
            println!("\n{}", "👋 Goodbye! Thanks for shopping!".yellow());
            break;
        } else if input_trimmed.eq_ignore_ascii_case("/order") {
            match session.place_order() {
                Some(confirmation) => ui.print_message("assistant", &confirmation),
                None => ui.print_notice("There is no product ready to order yet."),
            }
            continue;
        } else if input_trimmed.eq_ignore_ascii_case("/approve") {
            handle_approval(&ui, &mut session).await;
            continue;
        } else if input_trimmed.eq_ignore_ascii_case("/reset") {
            session.reset();
            if let Some(status) = &session.state().status {
                ui.print_message("assistant", status);
            }
            continue;
        } else if input_trimmed.eq_ignore_ascii_case("/restart") {
            session.restart();
            println!("{} New session: {}", "✓".green(), session.id().dimmed());
            continue;
        } else if input_trimmed.eq_ignore_ascii_case("/history") {
            ui.print_history(&session.state().transcript);
            continue;
        } else if input_trimmed.eq_ignore_ascii_case("/help") {
            ui.print_help();
            println!();
            continue;
        }

        handle_submit(&ui, &mut session, input_trimmed).await;
    }
    Ok(())
}
