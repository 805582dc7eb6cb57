// System clipboard access, used for copying story links.
//
// A fresh arboard handle per copy; holding one open pins display-server
// resources for the lifetime of the app. Fails on headless Linux without
// a display server, which callers surface as a toast.

use anyhow::{Context, Result};
use arboard::Clipboard;

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    Clipboard::new()
        .context("clipboard unavailable")?
        .set_text(text)
        .context("clipboard write failed")?;
    tracing::debug!("copied {} chars to clipboard", text.len());
    Ok(())
}
