//! Salones CLI - drive the venue page controllers against a live backend.
//!
//! Everything the page would show (panels, messages, alerts) is logged.
//!
//! # Usage
//!
//! ```bash
//! # Comments of venue 7
//! salones comments list 7
//!
//! # Publish a comment
//! salones comments add 7 --author Ana --text "Muy bonito" --rating 5
//!
//! # Moderation (logs in with SALONES_ADMIN_USER / SALONES_ADMIN_PASSWORD)
//! salones suggestions list
//! salones suggestions approve 3
//! salones venues delete 7 --yes
//! ```
//!
//! # Commands
//!
//! - `comments` - List, add and delete comments
//! - `suggestions` - Review pending suggestions
//! - `suggest` - Suggest a new venue
//! - `venues delete` - Delete a published venue

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use salones_core::{CommentId, Rating, Resolution, SuggestionId, VenueId};

mod commands;
mod terminal;

use commands::{Context, SuggestArgs};

#[derive(Parser)]
#[command(name = "salones")]
#[command(author, version, about = "Salones venue page tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and write venue comments
    Comments {
        #[command(subcommand)]
        action: CommentAction,
    },
    /// Review pending venue suggestions (admin)
    Suggestions {
        #[command(subcommand)]
        action: SuggestionAction,
    },
    /// Suggest a new venue
    Suggest {
        /// Venue name
        #[arg(long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// Contact phone
        #[arg(long)]
        phone: String,

        /// Map link
        #[arg(long, default_value = "")]
        map_url: String,

        /// Image file (repeat up to 3 times)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Manage published venues (admin)
    Venues {
        #[command(subcommand)]
        action: VenueAction,
    },
}

#[derive(Subcommand)]
enum CommentAction {
    /// Show a venue's comments and average rating
    List {
        /// Venue ID
        venue: VenueId,
    },
    /// Publish a comment
    Add {
        /// Venue ID
        venue: VenueId,

        /// Author name
        #[arg(short, long)]
        author: String,

        /// Comment text
        #[arg(short, long)]
        text: String,

        /// Stars, 1 to 5
        #[arg(short, long, value_parser = Rating::parse)]
        rating: Rating,
    },
    /// Delete a comment (admin)
    Delete {
        /// Comment ID
        comment: CommentId,

        /// Venue the comment belongs to, refreshed afterwards
        #[arg(long)]
        venue: VenueId,
    },
}

#[derive(Subcommand)]
enum SuggestionAction {
    /// List pending suggestions
    List,
    /// Publish a suggestion as a venue
    Approve {
        /// Suggestion ID
        id: SuggestionId,
    },
    /// Discard a suggestion
    Deny {
        /// Suggestion ID
        id: SuggestionId,
    },
}

#[derive(Subcommand)]
enum VenueAction {
    /// Delete a published venue
    Delete {
        /// Venue ID
        id: VenueId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("salones_client=info,salones_cli=info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let assume_yes = matches!(
        cli.command,
        Commands::Venues {
            action: VenueAction::Delete { yes: true, .. }
        }
    );
    let ctx = Context::from_env(assume_yes)?;

    match cli.command {
        Commands::Comments { action } => match action {
            CommentAction::List { venue } => commands::comments::list(&ctx, venue).await?,
            CommentAction::Add {
                venue,
                author,
                text,
                rating,
            } => commands::comments::add(&ctx, venue, &author, &text, rating).await?,
            CommentAction::Delete { comment, venue } => {
                commands::comments::delete(&ctx, comment, venue).await?;
            }
        },
        Commands::Suggestions { action } => match action {
            SuggestionAction::List => commands::suggestions::list(&ctx).await?,
            SuggestionAction::Approve { id } => {
                commands::suggestions::resolve(&ctx, id, Resolution::Approve).await?;
            }
            SuggestionAction::Deny { id } => {
                commands::suggestions::resolve(&ctx, id, Resolution::Deny).await?;
            }
        },
        Commands::Suggest {
            name,
            address,
            phone,
            map_url,
            images,
        } => {
            let args = SuggestArgs {
                name,
                address,
                phone,
                map_url,
                images,
            };
            commands::suggestions::submit(&ctx, args).await?;
        }
        Commands::Venues { action } => match action {
            VenueAction::Delete { id, .. } => commands::venues::delete(&ctx, id).await?,
        },
    }
    Ok(())
}
