use crate::message::Turn;
use crate::session::Action;
use crate::view::{context_summary, SessionView};
use chrono::Local;
use colored::*;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::Duration;

/// Terminal presentation layer for a session
pub struct ChatUI {
    term: Term,
    max_status_length: usize,
}

impl Default for ChatUI {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatUI {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            max_status_length: 4000,
        }
    }

    fn shorten(&self, text: &str) -> String {
        let count = text.chars().count();
        if count <= self.max_status_length {
            text.to_string()
        } else {
            let half = (self.max_status_length - 20) / 2;
            let head: String = text.chars().take(half).collect();
            let tail: String = text.chars().skip(count - half).collect();
            format!(
                "{}... [truncated {} chars] ...{}",
                head,
                count - self.max_status_length,
                tail
            )
        }
    }

    pub fn print_welcome(&self, base_url: &str, session_id: &str) {
        self.term.clear_screen().ok();
        println!("{}", "╔════════════════════════════════════════════════════════╗".bright_blue());
        println!("{}", "║          🛍️  Conversational Buying Assistant  🛍️          ║".bright_blue());
        println!("{}", "╚════════════════════════════════════════════════════════╝".bright_blue());
        println!();
        println!("{} {}", "Backend:".yellow(), base_url.cyan());
        println!("{} {}", "Session:".yellow(), session_id.dimmed());
        println!();
        self.print_help();
        println!("{}", "─".repeat(58).dimmed());
        println!();
    }

    pub fn print_help(&self) {
        println!("{}", "Commands:".yellow());
        println!("  • {} - Order the recommended product", "/order".cyan());
        println!(
            "  • {} - Mail the approver about the recommended product",
            "/approve".cyan()
        );
        println!("  • {} - Clear the conversation (same session)", "/reset".cyan());
        println!(
            "  • {} - Clear the conversation and start a new session",
            "/restart".cyan()
        );
        println!("  • {} - Show the conversation history", "/history".cyan());
        println!("  • {} - Show this help message", "/help".cyan());
        println!("  • {} or {} - Exit", "exit".cyan(), "quit".cyan());
    }

    pub fn print_message(&self, role: &str, content: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        match role {
            "user" => {
                println!(
                    "{} {} {}",
                    format!("[{}]", timestamp).dimmed(),
                    "You:".green().bold(),
                    content
                );
            }
            "assistant" => {
                println!(
                    "{} {} {}",
                    format!("[{}]", timestamp).dimmed(),
                    "Assistant:".blue().bold(),
                    self.shorten(content)
                );
            }
            _ => {}
        }
    }

    /// Spinner shown while a request is in flight
    pub fn thinking(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Products, offered action and policy note for the current turn
    pub fn print_view(&self, view: &SessionView) {
        if !view.rows.is_empty() {
            println!();
            println!("{}", "🎯 Top Product Suggestions".blue().bold());
            for row in &view.rows {
                let line = format!(
                    "  {} | {} | score {} | {} | {} | {}",
                    row.title,
                    row.price,
                    row.match_score,
                    row.availability,
                    row.delivery_time,
                    row.category
                );
                if row.best {
                    println!("{} {}", "★".green(), line.green().bold());
                } else {
                    println!("  {}", line);
                }
                println!("      {}", row.link.dimmed());
            }
        }

        match &view.action {
            Some(Action::Order) => {
                println!();
                println!(
                    "{} {}",
                    "✅".green(),
                    "Type /order to order the recommended product.".green()
                );
            }
            Some(Action::MailApprover { .. }) => {
                println!();
                println!(
                    "{} {}",
                    "✉️".yellow(),
                    "Type /approve to mail the approver.".yellow()
                );
                if let Some(note) = &view.policy_note {
                    println!("   {}", note.red().bold());
                }
            }
            None => {}
        }
        println!();
    }

    pub fn print_history(&self, transcript: &[Turn]) {
        if transcript.is_empty() {
            println!("{}", "No conversation yet.".yellow());
            return;
        }
        println!("{}", "🗨️ Conversation History".blue().bold());
        for turn in transcript {
            if let Some(user) = &turn.user {
                println!("{} {}", "You:".green().bold(), user);
            }
            if let Some(summary) = context_summary(turn) {
                println!("{} {}", "Extracted:".dimmed(), summary.italic());
            }
            println!("{} {}", "Assistant:".blue().bold(), turn.bot);
            println!("{}", "─".repeat(40).dimmed());
        }
        println!();
    }

    pub fn print_link(&self, link: &str, subject: Option<&str>) {
        println!(
            "{} {}",
            "✉️".yellow(),
            "Approval email ready. Open this link to send it:".yellow()
        );
        if let Some(subject) = subject {
            println!("   {} {}", "Subject:".dimmed(), subject);
        }
        println!("   {}", link.cyan().underline());
        println!();
    }

    pub fn print_notice(&self, notice: &str) {
        println!("{} {}", "ℹ".blue(), notice);
    }

    pub fn print_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error);
    }
}
