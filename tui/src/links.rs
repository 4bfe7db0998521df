//! Outbound targets. A terminal page has no real hyperlinks, so the
//! resume document, contact email, and profile are handed to the
//! operating system's opener instead.

use std::io;
use std::path::Path;

/// Subject preset on the contact email.
pub(crate) const MAIL_SUBJECT: &str = "Saying hi";

/// `mailto:` URL with the subject percent-encoded.
pub(crate) fn mailto(email: &str, subject: &str) -> String {
    format!("mailto:{email}?subject={}", urlencoding::encode(subject))
}

/// Relative resume documents ship next to the content file and resolve
/// against its directory; absolute paths pass through untouched.
pub(crate) fn resume_target(content_dir: Option<&Path>, document: &Path) -> String {
    if document.is_absolute() {
        return document.display().to_string();
    }
    match content_dir {
        Some(dir) => dir.join(document).display().to_string(),
        None => document.display().to_string(),
    }
}

/// Seam for launching targets, so the app loop can be exercised
/// without actually opening anything.
pub(crate) trait Launcher {
    fn launch(&self, target: &str) -> io::Result<()>;
}

/// Launches through the platform opener (`xdg-open`, `open`, `start`)
/// without waiting on it.
pub(crate) struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, target: &str) -> io::Result<()> {
        open::that_detached(target)
    }
}
