//! Comment threads over HTTP against the in-memory backend.

use salones_client::session::{ADMIN_KEY, MemorySessionStore, SessionStore};
use salones_client::view::{Content, FormId, Tone};
use salones_client::{Trigger, UiEvent};
use salones_core::{Rating, VenueId, venue_container_id};
use salones_integration_tests::{ADMIN_PASSWORD, ADMIN_USER, TestBackend, login_event};

fn html(content: Option<Content>) -> String {
    match content {
        Some(Content::Html(html)) => html,
        other => panic!("expected rendered comments, got {other:?}"),
    }
}

#[tokio::test]
async fn test_comments_and_average_round_trip() {
    let backend = TestBackend::start().await;
    let venue = backend.state.add_venue("Salón Acuarela");
    backend.state.add_comment(venue, "Ana", 5, "Precioso");
    backend.state.add_comment(venue, "Luis", 3, "Correcto");
    let (app, view) = backend.page(MemorySessionStore::new());

    app.dispatch(UiEvent::CommentsOpened(venue))
        .await
        .expect("comments should load");
    assert_eq!(view.average(venue).as_deref(), Some("4.0"));

    app.dispatch(UiEvent::CommentSubmit {
        venue,
        author: "  Eva ".to_string(),
        text: "Muy amplio".to_string(),
        rating: Rating::parse("4").expect("valid rating"),
    })
    .await
    .expect("comment should be stored");

    let stored = backend.state.comments(venue);
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().any(|c| c.author == "Eva"));
    assert_eq!(
        view.form_message(FormId::Comment(venue)),
        Some(("Comentario agregado.".to_string(), Tone::Info))
    );
    assert!(html(view.comments(venue)).contains("Muy amplio"));
    assert_eq!(view.average(venue).as_deref(), Some("4.0"));
}

#[tokio::test]
async fn test_comment_markup_is_rendered_as_text() {
    let backend = TestBackend::start().await;
    let venue = backend.state.add_venue("Jardín Real");
    backend.state.add_comment(venue, "Eve", 1, "<script>x</script>");
    let (app, view) = backend.page(MemorySessionStore::new());

    app.dispatch(UiEvent::CommentsOpened(venue))
        .await
        .expect("comments should load");

    let rendered = html(view.comments(venue));
    assert!(rendered.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!rendered.contains("<script>"));
}

#[tokio::test]
async fn test_empty_thread_shows_placeholders() {
    let backend = TestBackend::start().await;
    let venue = backend.state.add_venue("Nuevo");
    let (app, view) = backend.page(MemorySessionStore::new());

    app.dispatch(UiEvent::CommentsOpened(venue))
        .await
        .expect("comments should load");

    assert_eq!(view.comments(venue), Some(Content::text("Sin comentarios aún.")));
    assert_eq!(view.average(venue).as_deref(), Some("Sin calificaciones"));
}

#[tokio::test]
async fn test_server_rejection_is_shown_verbatim() {
    let backend = TestBackend::start().await;
    let (app, view) = backend.page(MemorySessionStore::new());
    let missing = VenueId::new(999);

    let result = app
        .dispatch(UiEvent::CommentSubmit {
            venue: missing,
            author: "Ana".to_string(),
            text: "Hola".to_string(),
            rating: Rating::parse("5").expect("valid rating"),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(
        view.form_message(FormId::Comment(missing)),
        Some(("Salón no existe.".to_string(), Tone::Error))
    );
}

#[tokio::test]
async fn test_admin_deletes_comment_and_thread_refreshes() {
    let backend = TestBackend::start().await;
    let venue = backend.state.add_venue("Salón Acuarela");
    backend.state.add_comment(venue, "Ana", 5, "Precioso");
    let spam = backend.state.add_comment(venue, "Bot", 1, "Compra ya");
    let (app, view) = backend.page(MemorySessionStore::new());

    app.dispatch(login_event(ADMIN_USER, ADMIN_PASSWORD))
        .await
        .expect("login should succeed");

    let trigger = Trigger::new("delete-comment")
        .with_data("comment-id", spam.to_string())
        .within(venue_container_id(venue));
    app.handle(&trigger).await.expect("delete should succeed");

    assert_eq!(backend.state.comments(venue).len(), 1);
    assert_eq!(view.average(venue).as_deref(), Some("5.0"));
    assert!(!html(view.comments(venue)).contains("Compra ya"));
}

#[tokio::test]
async fn test_stale_admin_flag_is_refused_by_server() {
    let backend = TestBackend::start().await;
    let venue = backend.state.add_venue("Salón Acuarela");
    let comment = backend.state.add_comment(venue, "Ana", 5, "Precioso");

    // Flag left over from an earlier tab session; no server login.
    let store = MemorySessionStore::new();
    store.set_item(ADMIN_KEY, "true");
    let (app, view) = backend.page(store);

    let trigger = Trigger::new("delete-comment")
        .with_data("comment-id", comment.to_string())
        .within(venue_container_id(venue));
    assert!(app.handle(&trigger).await.is_err());

    assert_eq!(view.alerts(), vec!["No autorizado"]);
    assert_eq!(backend.state.comments(venue).len(), 1);
}
