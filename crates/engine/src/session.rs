//! Client-side persisted state: the session token and the theme preference.
//!
//! Both are read on start and written on every change. The engine only sees
//! the traits, so tests run against [`MemorySession`].

use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::ResultEngine;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Holder of the authentication token.
pub trait SessionProvider: Send + Sync {
    fn token(&self) -> Option<String>;

    fn store_token(&self, token: &str) -> ResultEngine<()>;

    fn clear(&self) -> ResultEngine<()>;
}

/// Holder of the UI preferences.
pub trait Preferences: Send + Sync {
    fn theme(&self) -> ThemeMode;

    fn set_theme(&self, theme: ThemeMode) -> ResultEngine<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    token: Option<String>,
    theme: ThemeMode,
}

/// Non-persistent session and preferences.
#[derive(Debug, Default)]
pub struct MemorySession {
    inner: Mutex<MemoryState>,
}

impl MemorySession {
    pub fn with_token(token: &str) -> Self {
        Self {
            inner: Mutex::new(MemoryState {
                token: Some(token.to_string()),
                theme: ThemeMode::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionProvider for MemorySession {
    fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    fn store_token(&self, token: &str) -> ResultEngine<()> {
        self.lock().token = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ResultEngine<()> {
        self.lock().token = None;
        Ok(())
    }
}

impl Preferences for MemorySession {
    fn theme(&self) -> ThemeMode {
        self.lock().theme
    }

    fn set_theme(&self, theme: ThemeMode) -> ResultEngine<()> {
        self.lock().theme = theme;
        Ok(())
    }
}
