//! Markup fragments for list-producing responses.
//!
//! Comment and suggestion fields are user-supplied, so every value goes
//! through Askama's HTML escaper (`&`, `<`, `>`, `"`, `'`) before it reaches
//! the page.

use askama::Template;

use salones_core::{Comment, CommentId, Suggestion, SuggestionId};

use crate::filters;
use crate::messages;
use crate::view::Content;

/// Comment display data for templates.
struct CommentView<'a> {
    id: CommentId,
    author: &'a str,
    stars: u8,
    text: &'a str,
    timestamp: &'a str,
}

impl<'a> From<&'a Comment> for CommentView<'a> {
    fn from(comment: &'a Comment) -> Self {
        Self {
            id: comment.id,
            author: &comment.author,
            stars: comment.rating.stars(),
            text: &comment.text,
            timestamp: comment.timestamp.as_deref().unwrap_or_default(),
        }
    }
}

/// Suggestion card display data for templates.
struct SuggestionView<'a> {
    id: SuggestionId,
    name: &'a str,
    address: &'a str,
    phone: &'a str,
    map_link: Option<&'a str>,
    images: &'a [String],
}

impl<'a> From<&'a Suggestion> for SuggestionView<'a> {
    fn from(suggestion: &'a Suggestion) -> Self {
        Self {
            id: suggestion.id,
            name: &suggestion.name,
            address: &suggestion.address,
            phone: &suggestion.phone,
            map_link: suggestion.map_link(),
            images: &suggestion.images,
        }
    }
}

#[derive(Template)]
#[template(path = "partials/comments.html")]
struct CommentListTemplate<'a> {
    comments: Vec<CommentView<'a>>,
    /// Whether delete buttons start visible.
    admin: bool,
}

#[derive(Template)]
#[template(path = "partials/suggestions.html")]
struct SuggestionListTemplate<'a> {
    suggestions: Vec<SuggestionView<'a>>,
}

/// Render a venue's comment panel.
///
/// An empty thread renders the placeholder text instead of an empty list.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn comment_list(comments: &[Comment], admin: bool) -> askama::Result<Content> {
    if comments.is_empty() {
        return Ok(Content::text(messages::NO_COMMENTS));
    }

    let template = CommentListTemplate {
        comments: comments.iter().map(CommentView::from).collect(),
        admin,
    };
    Ok(Content::Html(template.render()?))
}

/// Render the pending suggestions review list.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn suggestion_list(suggestions: &[Suggestion]) -> askama::Result<Content> {
    let template = SuggestionListTemplate {
        suggestions: suggestions.iter().map(SuggestionView::from).collect(),
    };
    Ok(Content::Html(template.render()?))
}
