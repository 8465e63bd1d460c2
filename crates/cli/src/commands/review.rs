//! Review commands: leads, conversations, complaints.
//!
//! # Usage
//!
//! ```bash
//! bk-cli leads --days 7
//! bk-cli conversations list
//! bk-cli conversations messages conv_8f2
//! bk-cli complaints list
//! bk-cli complaints set-status 12 resolved
//! ```

use barakah_core::{ComplaintId, ComplaintStatus, ConversationId};

use super::{CliError, authed_backend};

/// List leads captured in the last `days` days.
#[allow(clippy::print_stdout)]
pub async fn leads(days: u32) -> Result<(), CliError> {
    let leads = authed_backend()?.leads(days).await?;
    if leads.is_empty() {
        println!("No leads in the last {days} days.");
        return Ok(());
    }

    for lead in leads {
        let dash = || "-".to_owned();
        println!(
            "#{} {} [{}] {} / {} / {} problem={} first={:?}",
            lead.id,
            lead.created_at.format("%Y-%m-%d %H:%M"),
            lead.domain,
            lead.name.unwrap_or_else(dash),
            lead.contact.unwrap_or_else(dash),
            lead.country.unwrap_or_else(dash),
            lead.problem_type.unwrap_or_else(dash),
            lead.first_question.unwrap_or_else(dash),
        );
    }
    Ok(())
}

/// List recorded conversations.
#[allow(clippy::print_stdout)]
pub async fn conversations() -> Result<(), CliError> {
    for conv in authed_backend()?.conversations().await? {
        println!("{} [{} / {}]", conv.id, conv.domain, conv.channel);
    }
    Ok(())
}

/// Print the transcript of one conversation.
#[allow(clippy::print_stdout)]
pub async fn conversation_messages(id: &ConversationId) -> Result<(), CliError> {
    for message in authed_backend()?.conversation_messages(id).await? {
        println!(
            "[{}] {}: {}",
            message.created_at.format("%Y-%m-%d %H:%M"),
            message.role,
            message.content
        );
    }
    Ok(())
}

/// List complaints.
#[allow(clippy::print_stdout)]
pub async fn complaints() -> Result<(), CliError> {
    for complaint in authed_backend()?.complaints().await? {
        println!("#{} [{}] {}", complaint.id, complaint.status, complaint.summary);
    }
    Ok(())
}

/// Move a complaint to a new status.
#[allow(clippy::print_stdout)]
pub async fn set_complaint_status(
    id: ComplaintId,
    status: ComplaintStatus,
) -> Result<(), CliError> {
    authed_backend()?.set_complaint_status(id, status).await?;
    println!("Complaint #{id} is now {status}.");
    Ok(())
}
