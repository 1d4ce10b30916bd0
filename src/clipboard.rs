use crate::error::{CollabError, CollabResult};
use crate::logging::log_error;

/// Copies text to the system clipboard.
pub fn copy(text: &str) -> CollabResult<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CollabError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| CollabError::ClipboardError(e.to_string()))?;
    Ok(())
}

/// Like [`copy`] but never fails the caller; failures are logged and
/// reported as `false`.
pub fn try_copy(text: &str) -> bool {
    match copy(text) {
        Ok(()) => true,
        Err(e) => {
            log_error(&format!("Failed to copy link: {}", e));
            false
        }
    }
}
