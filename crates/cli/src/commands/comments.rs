//! Comment commands.

use tracing::info;

use salones_core::{CommentId, Rating, VenueId, venue_container_id};

use super::{CliError, Context};

/// Show a venue's comments and average rating.
pub async fn list(ctx: &Context, venue: VenueId) -> Result<(), CliError> {
    let summary = ctx.sync().list_comments(venue).await?;
    info!(venue = %venue, count = summary.count(), "Comments listed");
    Ok(())
}

/// Publish a comment.
pub async fn add(
    ctx: &Context,
    venue: VenueId,
    author: &str,
    text: &str,
    rating: Rating,
) -> Result<(), CliError> {
    ctx.sync().submit_comment(venue, author, text, rating).await?;
    Ok(())
}

/// Delete a comment and show the venue's refreshed thread.
pub async fn delete(ctx: &Context, comment: CommentId, venue: VenueId) -> Result<(), CliError> {
    ctx.login().await?;
    let container = venue_container_id(venue);
    ctx.sync().delete_comment(comment, Some(&container)).await?;
    Ok(())
}
