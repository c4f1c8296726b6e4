use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::TokenResponse;

/// The server issues 30-minute tokens; anything older than this is almost
/// certainly going to be rejected.
const TOKEN_LIFETIME_MINUTES: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredToken {
    pub access_token: String,
    pub token_type: String,
    pub issued_at: DateTime<Utc>,
}

impl StoredToken {
    /// Local guess only; the server remains the authority and will answer
    /// 401 on a token it no longer accepts.
    pub fn is_probably_expired(&self) -> bool {
        Utc::now() - self.issued_at > Duration::minutes(TOKEN_LIFETIME_MINUTES)
    }
}

/// Keeps the session token issued at login on disk so separate CLI
/// invocations share one signed-in session.
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    const SESSION_FILE: &'static str = "session.yml";

    pub fn new() -> Result<Self> {
        Ok(Self {
            root: crate::infra::config::config_dir()?,
        })
    }

    pub fn at(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn save(&self, token: &TokenResponse) -> Result<()> {
        let record = StoredToken {
            access_token: token.access_token.clone(),
            token_type: token.token_type.clone(),
            issued_at: Utc::now(),
        };

        std::fs::create_dir_all(&self.root)?;
        let contents = serde_yaml::to_string(&record)?;
        std::fs::write(self.session_path(), contents).context("Failed to write session file")?;

        Ok(())
    }

    pub fn load(&self) -> Result<Option<StoredToken>> {
        let path = self.session_path();

        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        let record = serde_yaml::from_str(&contents)
            .context("Session file is unreadable; run `briefly login` again")?;

        Ok(Some(record))
    }

    /// Forget the stored token. Safe to call when nothing is stored.
    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();

        if path.exists() {
            std::fs::remove_file(&path)?;
        }

        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.root.join(Self::SESSION_FILE)
    }
}
