//! One-shot chat commands.
//!
//! # Usage
//!
//! ```bash
//! bk-cli chat "Do you deliver to Hongshan?"
//! bk-cli chat --conversation conv_8f2 --domain malisha-edu "And the fees?"
//! bk-cli playground "Which intent does this hit?"
//! ```

use barakah_client::types::ChatRequest;
use barakah_core::{ConversationId, Domain};

use super::{CliError, authed_backend, backend};

/// Send one public chat turn and print the answer.
///
/// The conversation id is printed so a follow-up turn can continue the same
/// conversation with `--conversation`.
#[allow(clippy::print_stdout)]
pub async fn send(
    message: &str,
    conversation: Option<String>,
    domain: Option<Domain>,
) -> Result<(), CliError> {
    let request = ChatRequest {
        message: message.to_owned(),
        conversation_id: conversation.map(ConversationId::from),
        domain_override: domain,
    };

    let response = backend()?.chat(&request).await?;

    println!("{}", response.answer);
    if response.used_web {
        println!("[web search used]");
    }
    println!("conversation: {}", response.conversation_id);
    Ok(())
}

/// Send one playground turn and print the answer plus debug fields.
#[allow(clippy::print_stdout)]
pub async fn playground(message: &str) -> Result<(), CliError> {
    let response = authed_backend()?.playground_chat(message).await?;

    println!("{}", response.answer);
    if !response.debug.is_empty() {
        let debug = serde_json::Value::Object(response.debug);
        println!("{}", serde_json::to_string_pretty(&debug).unwrap_or_default());
    }
    Ok(())
}
