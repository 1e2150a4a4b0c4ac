//! Bearer token persisted in a file between CLI invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kodu_core::{SessionError, TokenStore};

/// Token file used when neither `--token-file` nor `KODU_TOKEN_FILE` is set.
pub(crate) fn default_token_path() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".kodu")
        .join("token")
}

/// [`TokenStore`] over a single file holding the raw token.
#[derive(Debug, Clone)]
pub(crate) struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub(crate) const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        let storage = |err: std::io::Error| SessionError::Storage {
            detail: format!("{}: {err}", self.path.display()),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage)?;
        }
        fs::write(&self.path, token).map_err(storage)?;
        restrict_permissions(&self.path).map_err(storage)
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove token file");
            }
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::temp_token_path;

    #[test]
    fn save_load_and_clear() {
        let store = FileTokenStore::new(temp_token_path());
        assert!(store.load().is_none());

        store.save("abc.def.ghi").expect("save token");
        assert_eq!(store.load().as_deref(), Some("abc.def.ghi"));
        assert!(store.path().exists());

        store.clear();
        assert!(store.load().is_none());
        store.clear();
    }

    #[test]
    fn blank_file_is_no_token() {
        let store = FileTokenStore::new(temp_token_path());
        store.save("  \n").expect("save blank");
        assert!(store.load().is_none());
        store.clear();
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let store = FileTokenStore::new(temp_token_path());
        store.save("t").expect("save token");
        let mode = fs::metadata(store.path()).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        store.clear();
    }

    #[test]
    fn default_path_ends_in_kodu_token() {
        assert!(default_token_path().ends_with(".kodu/token"));
    }
}
