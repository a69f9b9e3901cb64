//! Utility functions for sitectl

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use directories::BaseDirs;
use rand::RngCore;

/// Expand a leading `~/` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

/// Copy an existing file aside before it gets overwritten
///
/// The copy goes to `<file>.original`, or to a timestamped name when an
/// `.original` is already there. Returns the backup path, or `None` when
/// there was nothing to back up.
pub fn backup_file(path: &Path) -> std::io::Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let mut backup = append_extension(path, "original");
    if backup.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        backup = append_extension(path, &format!("original.{}", stamp));
    }

    std::fs::copy(path, &backup)?;
    tracing::debug!("Backed up {} to {}", path.display(), backup.display());
    Ok(Some(backup))
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Random url-safe base64 string built from `bytes` random bytes
pub fn random_base64(bytes: usize) -> String {
    let mut buffer = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}

/// Relative path from a directory nested `depth` levels down back to `target`
pub fn relative_from_depth(depth: usize, target: &str) -> String {
    format!("{}{}", "../".repeat(depth), target)
}

/// Check if running in CI environment
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("CONTINUOUS_INTEGRATION").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
