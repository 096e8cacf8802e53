//! Static asset paths.

const STATIC_PREFIX: &str = "/static/";

/// Resolve a stored image reference to its served path.
///
/// Stored paths are relative to the static folder (`salones/SE1.PNG`);
/// references that already start with `/static/` are left alone.
///
/// ```
/// use salones_core::static_path;
///
/// assert_eq!(static_path("salones/SE1.PNG"), "/static/salones/SE1.PNG");
/// assert_eq!(static_path("/static/salones/SE1.PNG"), "/static/salones/SE1.PNG");
/// ```
#[must_use]
pub fn static_path(reference: &str) -> String {
    if reference.starts_with(STATIC_PREFIX) {
        reference.to_owned()
    } else {
        format!("{STATIC_PREFIX}{}", reference.trim_start_matches('/'))
    }
}
