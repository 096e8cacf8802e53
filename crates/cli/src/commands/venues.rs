//! Venue commands.

use tracing::info;

use salones_core::VenueId;

use super::{CliError, Context};

/// Delete a published venue. Declining the confirmation is not an error.
pub async fn delete(ctx: &Context, venue: VenueId) -> Result<(), CliError> {
    ctx.login().await?;
    if !ctx.sync().delete_venue(venue).await? {
        info!(venue = %venue, "Deletion cancelled");
    }
    Ok(())
}
