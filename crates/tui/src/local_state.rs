//! Session token and theme preference persisted between runs.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use engine::{EngineError, Preferences, ResultEngine, SessionProvider, ThemeMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalState {
    pub token: Option<String>,
    pub theme: ThemeMode,
}

/// File-backed [`SessionProvider`] and [`Preferences`]. The file is read
/// once on open and rewritten on every change.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    inner: Mutex<LocalState>,
}

impl LocalStore {
    /// A missing or unreadable file yields the defaults.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match read_json_file(&path) {
            Some(state) => state,
            None => {
                tracing::debug!("no usable state at {}, starting fresh", path.display());
                LocalState::default()
            }
        };
        Self {
            path,
            inner: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LocalState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The in-memory state only changes once the file write succeeded.
    fn update<F>(&self, f: F) -> ResultEngine<()>
    where
        F: FnOnce(&mut LocalState),
    {
        let mut guard = self.lock();
        let mut next = guard.clone();
        f(&mut next);
        write_json_file(&self.path, &next).map_err(|err| {
            tracing::error!("state save failed: {err}");
            EngineError::Storage(err.to_string())
        })?;
        *guard = next;
        Ok(())
    }
}

impl SessionProvider for LocalStore {
    fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    fn store_token(&self, token: &str) -> ResultEngine<()> {
        self.update(|state| state.token = Some(token.to_string()))
    }

    fn clear(&self) -> ResultEngine<()> {
        self.update(|state| state.token = None)
    }
}

impl Preferences for LocalStore {
    fn theme(&self) -> ThemeMode {
        self.lock().theme
    }

    fn set_theme(&self, theme: ThemeMode) -> ResultEngine<()> {
        self.update(|state| state.theme = theme)
    }
}

fn read_json_file(path: &Path) -> Option<LocalState> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn write_json_file(path: &Path, state: &LocalState) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state).map_err(std::io::Error::other)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
