//! Clipboard access

use crate::utils::{QuickripError, Result};
use arboard::Clipboard;

/// Current clipboard text, trimmed
pub fn read_text() -> Result<String> {
    let mut clipboard = Clipboard::new()
        .map_err(|e| QuickripError::Clipboard(format!("Failed to access clipboard: {}", e)))?;

    clipboard
        .get_text()
        .map(|text| text.trim().to_string())
        .map_err(|e| QuickripError::Clipboard(format!("Failed to read clipboard: {}", e)))
}
