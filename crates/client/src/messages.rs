//! User-facing texts.
//!
//! Server-reported failures are shown verbatim; these are the placeholders,
//! confirmations and the fallbacks used when the server sends no text.

// Comments
pub const LOADING: &str = "Cargando...";
pub const NO_COMMENTS: &str = "Sin comentarios aún.";
pub const COMMENTS_LOAD_FAILED: &str = "Error al cargar comentarios.";
pub const COMMENT_REQUIRED_FIELDS: &str = "Nombre y comentario son obligatorios.";
pub const COMMENT_ADDED: &str = "Comentario agregado.";
pub const COMMENT_SEND_FAILED: &str = "Error al enviar.";
pub const COMMENT_DELETE_RESTRICTED: &str = "Acceso restringido para administradores.";
pub const COMMENT_DELETE_FAILED: &str = "No se pudo eliminar el comentario.";
pub const COMMENT_DELETE_NETWORK: &str = "Error de red al eliminar el comentario.";

// Login
pub const LOGIN_GRANTED: &str = "Acceso concedido.";
pub const LOGIN_REJECTED: &str = "Credenciales incorrectas.";

// Suggestions review
pub const SUGGESTIONS_UNAUTHORIZED: &str = "No autorizado.";
pub const SUGGESTIONS_NETWORK: &str = "Error de red al cargar sugerencias.";
pub const RESOLVE_DONE: &str = "Operación realizada.";
pub const RESOLVE_FAILED: &str = "Operación fallida.";
pub const RESOLVE_NETWORK: &str = "Error de red al operar.";

// Suggest a venue
pub const TOO_MANY_IMAGES: &str = "Solo puedes subir hasta 3 imágenes";
pub const SUGGESTION_SENT: &str = "Sugerencia enviada correctamente.";
pub const SUGGESTION_SEND_FAILED: &str = "Error al enviar sugerencia.";

// Venue deletion
pub const VENUE_DELETE_UNAUTHORIZED: &str = "No autorizado";
pub const VENUE_DELETE_CONFIRM: &str = "¿Seguro que deseas eliminar este salón?";
pub const VENUE_DELETE_FAILED: &str = "No se pudo eliminar el salón";
pub const VENUE_DELETED: &str = "Salón eliminado correctamente";
pub const VENUE_DELETE_NETWORK: &str = "Error de conexión";

// Shared
pub const NETWORK_ERROR: &str = "Error de red.";
