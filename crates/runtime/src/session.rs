//! Persisted login session for the presentation side.
//!
//! The session is loaded once at startup, handed to whoever needs it, and
//! written back explicitly on login/logout.

use std::{
    fs::{self, File},
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::default_session_path;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthData {
    pub access_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .and_then(|u| u.role.as_deref())
            .is_some_and(|role| role == ADMIN_ROLE)
    }

    pub fn set_auth(&mut self, auth: AuthData) {
        self.access_token = Some(auth.access_token);
        self.user = Some(auth.user);
    }

    pub fn update_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn clear(&mut self) {
        self.access_token = None;
        self.user = None;
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            path: default_session_path(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session. A missing or unreadable file yields an empty session.
    pub fn load(&self) -> Session {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    debug!("cannot open session file {}: {e}", self.path.display());
                }
                return Session::default();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(session) => session,
            Err(e) => {
                debug!("ignoring malformed session file {}: {e}", self.path.display());
                Session::default()
            }
        }
    }

    /// Write the session atomically (temp file in the same directory, then rename).
    pub fn save(&self, session: &Session) -> io::Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), session).map_err(io::Error::other)?;
        tmp.as_file_mut().write_all(b"\n")?;
        tmp.as_file().sync_all()?;

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
