//! Barakah CLI - operator access to the assistant backend.
//!
//! # Usage
//!
//! ```bash
//! # Log in (token cached in $HOME/.config/barakah/session.json)
//! bk-cli login fatima
//!
//! # One-shot chat; prints the conversation id for follow-ups
//! bk-cli chat "Do you deliver to Hongshan?"
//! bk-cli chat --conversation conv_8f2 "And on Fridays?"
//!
//! # Admin review
//! bk-cli leads --days 7
//! bk-cli complaints set-status 12 resolved
//!
//! # Knowledge ingestion
//! bk-cli ingest pdf --file menu.pdf --title "Menu 2026" --source kitchen
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use barakah_core::{CategoryId, ComplaintId, ComplaintStatus, ConversationId, Domain, MenuItemId, PriceCny};

mod commands;

use commands::menu::MenuItemArgs;

#[derive(Parser)]
#[command(name = "bk-cli")]
#[command(author, version, about = "Barakah assistant CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and cache the session token
    Login {
        /// Username
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and cache the session token
    Signup {
        /// Username
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Remove the cached session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Send one public chat turn
    Chat {
        /// The message to send
        message: String,

        /// Continue an existing conversation
        #[arg(short, long)]
        conversation: Option<String>,

        /// Pin the answer to one brand (`al-barakah`, `malisha-edu`, `easylink`, `brcc`)
        #[arg(short, long)]
        domain: Option<Domain>,
    },
    /// Send one admin playground turn (prints debug fields)
    Playground {
        /// The message to send
        message: String,
    },
    /// List captured leads
    Leads {
        /// Look-back window in days
        #[arg(long, default_value_t = barakah_client::client::DEFAULT_LEAD_DAYS)]
        days: u32,
    },
    /// Inspect recorded conversations
    Conversations {
        #[command(subcommand)]
        action: ConversationsAction,
    },
    /// Manage complaints
    Complaints {
        #[command(subcommand)]
        action: ComplaintsAction,
    },
    /// Manage menu items
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Ingest knowledge into the backend
    Ingest {
        #[command(subcommand)]
        action: IngestAction,
    },
}

#[derive(Subcommand)]
enum ConversationsAction {
    /// List recorded conversations
    List,
    /// Print one conversation's transcript
    Messages {
        /// Conversation id
        id: String,
    },
}

#[derive(Subcommand)]
enum ComplaintsAction {
    /// List complaints
    List,
    /// Move a complaint to a new status (`open`, `in_progress`, `resolved`)
    SetStatus {
        /// Complaint id
        id: i64,

        /// New status
        status: ComplaintStatus,
    },
}

#[derive(clap::Args)]
struct MenuItemFields {
    /// English name
    #[arg(long)]
    name_en: String,

    /// Bangla name
    #[arg(long)]
    name_bn: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Price in CNY
    #[arg(long)]
    price: PriceCny,

    /// Category id
    #[arg(long)]
    category: Option<i64>,

    /// Availability
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    available: bool,

    /// Tags (repeatable)
    #[arg(long)]
    tag: Vec<String>,
}

impl From<MenuItemFields> for MenuItemArgs {
    fn from(fields: MenuItemFields) -> Self {
        Self {
            name_en: fields.name_en,
            name_bn: fields.name_bn,
            description: fields.description,
            price: fields.price,
            category: fields.category.map(CategoryId::new),
            available: fields.available,
            tags: fields.tag,
        }
    }
}

#[derive(Subcommand)]
enum MenuAction {
    /// List menu items
    List,
    /// Create a menu item
    Create {
        #[command(flatten)]
        fields: MenuItemFields,
    },
    /// Update a menu item
    Update {
        /// Menu item id
        id: i64,

        #[command(flatten)]
        fields: MenuItemFields,
    },
    /// Delete a menu item
    Delete {
        /// Menu item id
        id: i64,
    },
}

#[derive(Subcommand)]
enum IngestAction {
    /// Ingest raw text (from --file or stdin)
    Text {
        /// Document title
        #[arg(long)]
        title: String,

        /// Source label
        #[arg(long)]
        source: String,

        /// Language code
        #[arg(long)]
        lang: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Read the text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Ingest a URL
    Url {
        /// The URL to fetch
        #[arg(long)]
        url: String,

        /// Source label
        #[arg(long)]
        source: String,

        /// Language code
        #[arg(long)]
        lang: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },
    /// Ingest a URL with distillation
    UrlDistilled {
        /// The URL to fetch
        #[arg(long)]
        url: String,

        /// Source label
        #[arg(long)]
        source: String,

        /// Language code
        #[arg(long)]
        lang: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Entity hint (repeatable)
        #[arg(long = "hint")]
        hints: Vec<String>,
    },
    /// Distill text into structured facts (from --file or stdin)
    DistillText {
        /// Source label
        #[arg(long)]
        source: String,

        /// Language code
        #[arg(long)]
        lang: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Entity hint (repeatable)
        #[arg(long = "hint")]
        hints: Vec<String>,

        /// Read the text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Ingest a PDF (5 MB cap)
    Pdf {
        /// Path to the PDF file
        #[arg(long)]
        file: PathBuf,

        /// Document title
        #[arg(long)]
        title: String,

        /// Source label
        #[arg(long)]
        source: String,

        /// Language code
        #[arg(long)]
        lang: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&username, password).await?;
        }
        Commands::Signup { username, password } => {
            commands::auth::signup(&username, password).await?;
        }
        Commands::Logout => commands::auth::logout()?,
        Commands::Whoami => commands::auth::whoami().await?,
        Commands::Chat {
            message,
            conversation,
            domain,
        } => commands::chat::send(&message, conversation, domain).await?,
        Commands::Playground { message } => commands::chat::playground(&message).await?,
        Commands::Leads { days } => commands::review::leads(days).await?,
        Commands::Conversations { action } => match action {
            ConversationsAction::List => commands::review::conversations().await?,
            ConversationsAction::Messages { id } => {
                commands::review::conversation_messages(&ConversationId::from(id)).await?;
            }
        },
        Commands::Complaints { action } => match action {
            ComplaintsAction::List => commands::review::complaints().await?,
            ComplaintsAction::SetStatus { id, status } => {
                commands::review::set_complaint_status(ComplaintId::new(id), status).await?;
            }
        },
        Commands::Menu { action } => match action {
            MenuAction::List => commands::menu::list().await?,
            MenuAction::Create { fields } => commands::menu::create(fields.into()).await?,
            MenuAction::Update { id, fields } => {
                commands::menu::update(MenuItemId::new(id), fields.into()).await?;
            }
            MenuAction::Delete { id } => commands::menu::delete(MenuItemId::new(id)).await?,
        },
        Commands::Ingest { action } => match action {
            IngestAction::Text {
                title,
                source,
                lang,
                description,
                file,
            } => commands::ingest::text(title, source, lang, description, file).await?,
            IngestAction::Url {
                url,
                source,
                lang,
                description,
            } => commands::ingest::url(url, source, lang, description).await?,
            IngestAction::UrlDistilled {
                url,
                source,
                lang,
                description,
                hints,
            } => commands::ingest::url_distilled(url, source, lang, description, hints).await?,
            IngestAction::DistillText {
                source,
                lang,
                description,
                hints,
                file,
            } => commands::ingest::distill_text(source, lang, description, hints, file).await?,
            IngestAction::Pdf {
                file,
                title,
                source,
                lang,
                description,
            } => commands::ingest::pdf(file, title, source, lang, description).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_chat_with_overrides() {
        let cli = Cli::try_parse_from([
            "bk-cli",
            "chat",
            "--conversation",
            "conv_8f2",
            "--domain",
            "malisha-edu",
            "And the fees?",
        ])
        .expect("parse");
        match cli.command {
            Commands::Chat {
                message,
                conversation,
                domain,
            } => {
                assert_eq!(message, "And the fees?");
                assert_eq!(conversation.as_deref(), Some("conv_8f2"));
                assert_eq!(domain, Some(Domain::MalishaEdu));
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn test_cli_parses_complaint_status() {
        let cli = Cli::try_parse_from(["bk-cli", "complaints", "set-status", "12", "resolved"])
            .expect("parse");
        match cli.command {
            Commands::Complaints {
                action: ComplaintsAction::SetStatus { id, status },
            } => {
                assert_eq!(id, 12);
                assert_eq!(status, ComplaintStatus::Resolved);
            }
            _ => panic!("expected complaints set-status"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_domain() {
        assert!(Cli::try_parse_from(["bk-cli", "chat", "--domain", "bistro", "hi"]).is_err());
    }

    #[test]
    fn test_cli_rejects_negative_price() {
        assert!(
            Cli::try_parse_from([
                "bk-cli", "menu", "create", "--name-en", "Kacchi", "--price", "-5"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_leads_days_default() {
        let cli = Cli::try_parse_from(["bk-cli", "leads"]).expect("parse");
        match cli.command {
            Commands::Leads { days } => assert_eq!(days, 2),
            _ => panic!("expected leads command"),
        }
    }
}
