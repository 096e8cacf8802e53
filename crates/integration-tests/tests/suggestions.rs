//! Venue suggestions over HTTP against the in-memory backend.

use salones_client::UiEvent;
use salones_client::api::{ImageUpload, SuggestionForm};
use salones_client::session::MemorySessionStore;
use salones_client::view::{FormId, Modal, Tone};
use salones_integration_tests::TestBackend;

fn image(name: &str) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        content_type: Some("image/jpeg".to_string()),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

fn form(images: Vec<ImageUpload>) -> SuggestionForm {
    SuggestionForm {
        name: "Salón Acuarela".to_string(),
        address: "Av. Buenos Aires, #591".to_string(),
        phone: "+591 62548751".to_string(),
        map_url: "https://maps.app.goo.gl/example".to_string(),
        images,
    }
}

#[tokio::test]
async fn test_suggestion_is_queued_for_review() {
    let backend = TestBackend::start().await;
    let (app, view) = backend.page(MemorySessionStore::new());
    app.dispatch(UiEvent::OpenModal(Modal::Suggest))
        .await
        .expect("dialogs always open");

    app.dispatch(UiEvent::SuggestionSubmit(form(vec![
        image("foto 1.jpg"),
        image("foto2.jpg"),
    ])))
    .await
    .expect("suggestion should be accepted");

    let pending = backend.state.pending();
    assert_eq!(pending.len(), 1);
    let queued = pending.first().expect("one pending suggestion");
    assert_eq!(queued.name, "Salón Acuarela");
    assert_eq!(queued.images, vec!["salones/foto_1.jpg", "salones/foto2.jpg"]);

    assert_eq!(
        view.form_message(FormId::Suggestion),
        Some(("Sugerencia enviada correctamente.".to_string(), Tone::Info))
    );
    assert!(view.was_reset(FormId::Suggestion));
    assert!(!view.is_open(Modal::Suggest));
}

#[tokio::test]
async fn test_incomplete_suggestion_shows_server_text() {
    let backend = TestBackend::start().await;
    let (app, view) = backend.page(MemorySessionStore::new());
    let incomplete = SuggestionForm {
        map_url: String::new(),
        ..form(vec![image("foto.jpg")])
    };

    assert!(app.dispatch(UiEvent::SuggestionSubmit(incomplete)).await.is_err());

    assert_eq!(
        view.form_message(FormId::Suggestion),
        Some(("Todos los campos son obligatorios".to_string(), Tone::Error))
    );
    assert!(backend.state.pending().is_empty());
}

#[tokio::test]
async fn test_four_images_never_reach_the_server() {
    let backend = TestBackend::start().await;
    let (app, view) = backend.page(MemorySessionStore::new());
    let images = vec![image("1.jpg"), image("2.jpg"), image("3.jpg"), image("4.jpg")];

    assert!(app.dispatch(UiEvent::ImagesSelected(images.len())).await.is_err());
    assert!(app.dispatch(UiEvent::SuggestionSubmit(form(images))).await.is_err());

    assert!(view.file_input_cleared());
    assert_eq!(
        view.alerts(),
        vec![
            "Solo puedes subir hasta 3 imágenes",
            "Solo puedes subir hasta 3 imágenes"
        ]
    );
    assert!(backend.state.pending().is_empty());
}
