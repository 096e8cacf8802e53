//! Suggestion commands.

use std::path::Path;

use tracing::info;

use salones_client::api::{ImageUpload, SuggestionForm};
use salones_core::{MAX_SUGGESTION_IMAGES, Resolution, SuggestionId};

use super::{CliError, Context, SuggestArgs};

/// List pending suggestions.
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    ctx.login().await?;
    let count = ctx.sync().list_suggestions().await?;
    info!(count, "Pending suggestions listed");
    Ok(())
}

/// Approve or deny a pending suggestion.
pub async fn resolve(
    ctx: &Context,
    suggestion: SuggestionId,
    resolution: Resolution,
) -> Result<(), CliError> {
    ctx.login().await?;
    ctx.sync().resolve_suggestion(suggestion, resolution).await?;
    Ok(())
}

/// Suggest a new venue.
///
/// The image count is checked before any file is read.
pub async fn submit(ctx: &Context, args: SuggestArgs) -> Result<(), CliError> {
    ctx.sync().select_suggestion_images(args.images.len())?;

    let mut images = Vec::with_capacity(args.images.len().min(MAX_SUGGESTION_IMAGES));
    for path in &args.images {
        images.push(read_image(path).await?);
    }

    let form = SuggestionForm {
        name: args.name,
        address: args.address,
        phone: args.phone,
        map_url: args.map_url,
        images,
    };
    ctx.sync().submit_suggestion(&form).await?;
    Ok(())
}

async fn read_image(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map_or_else(|| "imagen".to_string(), |name| name.to_string_lossy().into_owned());

    Ok(ImageUpload {
        content_type: content_type(path).map(str::to_string),
        file_name,
        bytes,
    })
}

fn content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
