use std::path::Path;

use crate::error::Result;

/// Write `content` to `path` atomically, readable only by the owner on Unix.
///
/// The temp file gets its permissions before the rename, so the final path
/// never exists with the default mode.
pub(crate) fn write_private(path: &Path, content: &str) -> Result<()> {
    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_path);

    std::fs::write(&temp_path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&temp_path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(&temp_path, perms)?;
    }

    std::fs::rename(&temp_path, path)?;
    Ok(())
}
