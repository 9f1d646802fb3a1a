use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[cfg(unix)]
const CACHE_DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const ARTIFACT_FILE_MODE: u32 = 0o755;

fn temp_path_for(path: &Path) -> PathBuf {
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut temp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| std::ffi::OsString::from("artifact"));
    temp_name.push(format!(".{}.{}.tmp", std::process::id(), counter));
    path.with_file_name(temp_name)
}

fn parent_dir_for_fs_ops(path: &Path) -> Option<&Path> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = parent_dir_for_fs_ops(path) {
        let dir = fs::File::open(parent)?;
        dir.sync_all()?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn mark_executable(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(ARTIFACT_FILE_MODE))
}

#[cfg(not(unix))]
fn mark_executable(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

/// Creates `dir` and its parents if missing. Existing directories are left alone.
pub(crate) fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(CACHE_DIR_MODE);
    }
    builder.create(dir)
}

fn write_temp(temp_path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(content)?;
    mark_executable(&file)?;
    file.sync_all()
}

/// Writes `content` next to `path` and renames it into place.
///
/// Readers either see no file or the complete one. The temporary file is
/// removed when any step fails.
#[instrument(skip_all, fields(path = %path.display(), bytes = content.len()))]
pub(crate) fn write_atomic_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    write_atomic_file_with(path, content, sync_parent_dir)
}

/// Once the rename succeeded the artifact is complete, so a failing directory
/// sync is logged rather than reported.
fn write_atomic_file_with(
    path: &Path,
    content: &[u8],
    sync_dir: fn(&Path) -> std::io::Result<()>,
) -> std::io::Result<()> {
    if let Some(parent) = parent_dir_for_fs_ops(path) {
        ensure_dir(parent)?;
    }

    let temp_path = temp_path_for(path);

    let result = write_temp(&temp_path, content).and_then(|()| {
        #[cfg(windows)]
        if path.exists() {
            fs::remove_file(path)?;
        }
        fs::rename(&temp_path, path)
    });

    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                debug!(temp = %temp_path.display(), error = %cleanup, "Failed to remove temp file");
            }
        }
        return Err(e);
    }

    if let Err(e) = sync_dir(path) {
        debug!(error = %e, "Failed to sync parent directory");
    }
    debug!("Artifact written");
    Ok(())
}

/// Returns true when `path` is an existing regular file.
pub(crate) fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
