use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

fn app_data_dir() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
        .join("DiaDrop")
}

/// Default project folder: `{data_dir}/DiaDrop/projects`, or `./DiaDrop/projects` when
/// the platform has no data directory.
#[must_use]
pub fn default_projects_dir() -> PathBuf {
    app_data_dir().join("projects")
}

/// Default log folder, a sibling of the project folder.
#[must_use]
pub fn default_log_dir() -> PathBuf {
    app_data_dir().join("logs")
}

/// Replace `path` with `bytes` as a whole.
///
/// Content goes to a temp file in the same directory which is then renamed over the
/// target, so readers see either the old file or the new one. On Unix the file is 0o600.
///
/// # Errors
/// Returns an error if the temp file cannot be written or renamed into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut tmp = tempfile::Builder::new().prefix(".dia-").suffix(".tmp").tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Remove a file, treating "already gone" as success. Returns whether a file was removed.
///
/// # Errors
/// Any error other than `NotFound`.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Run `op` up to `retries + 1` times, doubling the pause after each transient failure.
///
/// `NotFound`, `PermissionDenied` and `InvalidInput` are returned immediately.
pub fn with_retry<T>(
    retries: u32,
    backoff: Duration,
    mut op: impl FnMut() -> io::Result<T>,
) -> io::Result<T> {
    let mut pause = backoff;
    let mut attempt = 0;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < retries && is_transient(&e) => {
                attempt += 1;
                log::warn!("transient I/O failure (attempt {attempt}/{retries}): {e}");
                thread::sleep(pause);
                pause = pause.saturating_mul(2);
            }
            Err(e) => return Err(e),
        }
    }
}

fn is_transient(e: &io::Error) -> bool {
    !matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied | io::ErrorKind::InvalidInput
    )
}
