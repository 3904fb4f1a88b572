//! Atomic file replacement.
//!
//! Content is written to a temp file in the target's directory and renamed
//! over the target, so a crash mid-write never leaves a truncated manifest or
//! changelog behind.

use std::io::Write;
use std::path::Path;

use tempfile::Builder;

/// Replace `path` with `contents` atomically.
///
/// The temp file lives next to the target so the final rename never crosses
/// filesystems. Existing permissions of the target are carried over; a new
/// file gets the same mode a plain create would (0666 minus the umask).
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;

    if let Ok(metadata) = std::fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
