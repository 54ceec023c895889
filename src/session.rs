//! Session state that outlives a single page view
//!
//! The site remembers a handful of things between visits: the colour theme,
//! the organizer key, the participant's email verification and the last
//! synced copy of the archive. [`Session`] holds all of it and a
//! [`SessionStore`] decides where it lives. Load once at start-up, save after
//! every change, and call [`Session::logout`] to drop credentials.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::row::Row;

/// Colour theme of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Default theme for a local hour of the day: light from 7:00 to 19:00
    pub fn for_hour(hour: u32) -> Self {
        if (7..19).contains(&hour) {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Proof that a participant confirmed their email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub email: String,
    pub session_token: String,
}

impl Verification {
    /// Create a verification for an email and the token the API issued for it
    pub fn new(email: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            session_token: session_token.into(),
        }
    }

    /// Whether this verification covers `email` and still carries a token
    pub fn matches(&self, email: &str) -> bool {
        !self.session_token.is_empty() && !email.is_empty() && self.email == email
    }
}

/// Everything the site keeps between page views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Explicit theme choice. `None` follows the time of day
    pub theme: Option<Theme>,
    pub admin_key: Option<String>,
    pub verification: Option<Verification>,
    /// Last archive rows synced from the remote sheet
    pub archive: Vec<Row>,
}

impl Session {
    /// Load the session from a store, starting fresh when nothing is stored
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(store.load()?.unwrap_or_default())
    }

    /// Persist the session
    pub fn save<S: SessionStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.save(self)
    }

    /// Theme to display at the given local hour
    pub fn effective_theme(&self, hour: u32) -> Theme {
        self.theme.unwrap_or_else(|| Theme::for_hour(hour))
    }

    /// Switch to the other theme and remember the choice
    pub fn toggle_theme(&mut self, hour: u32) -> Theme {
        let theme = self.effective_theme(hour).toggled();
        self.theme = Some(theme);
        theme
    }

    /// Whether an organizer key is present
    pub fn is_admin(&self) -> bool {
        self.admin_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Replace the cached archive
    pub fn set_archive(&mut self, rows: Vec<Row>) {
        debug!(rows = rows.len(), "archive cache updated");
        self.archive = rows;
    }

    /// Drop the organizer key and the email verification
    ///
    /// The theme and the archive cache are not tied to a person and survive.
    pub fn logout(&mut self) {
        self.admin_key = None;
        self.verification = None;
    }
}

/// Where a [`Session`] is persisted
pub trait SessionStore {
    /// Read the stored session
    ///
    /// # Returns
    /// `Ok(None)` when nothing usable is stored
    fn load(&self) -> Result<Option<Session>>;

    /// Replace the stored session
    fn save(&mut self, session: &Session) -> Result<()>;

    /// Remove the stored session
    fn clear(&mut self) -> Result<()>;
}

/// Session store kept in memory as serialized JSON
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    stored: Option<String>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        match &self.stored {
            Some(raw) => Ok(parse_session(raw)),
            None => Ok(None),
        }
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        self.stored = Some(serde_json::to_string(session)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.stored = None;
        Ok(())
    }
}

/// Session store backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by a JSON file. The file need not exist yet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(parse_session(&raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, session)?;
        writer.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// A corrupt session is treated like a missing one
fn parse_session(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!("ignoring unreadable stored session: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use pretty_assertions::assert_eq;

    fn signed_in() -> Session {
        Session {
            theme: Some(Theme::Dark),
            admin_key: Some("secret".to_string()),
            verification: Some(Verification::new("ann@example.org", "token-1")),
            archive: vec![
                Row::new()
                    .with(Column::Meeting, "2026-02-04")
                    .with(Column::Title, "Paper, One"),
            ],
        }
    }

    #[test]
    fn test_theme_for_hour() {
        assert_eq!(Theme::for_hour(6), Theme::Dark);
        assert_eq!(Theme::for_hour(7), Theme::Light);
        assert_eq!(Theme::for_hour(18), Theme::Light);
        assert_eq!(Theme::for_hour(19), Theme::Dark);
    }

    #[test]
    fn test_toggle_remembers_choice() {
        let mut session = Session::default();
        assert_eq!(session.effective_theme(12), Theme::Light);
        assert_eq!(session.toggle_theme(12), Theme::Dark);
        assert_eq!(session.effective_theme(12), Theme::Dark);
        assert_eq!(session.effective_theme(23), Theme::Dark);
    }

    #[test]
    fn test_logout_keeps_theme_and_archive() {
        let mut session = signed_in();
        session.logout();

        assert!(!session.is_admin());
        assert_eq!(session.verification, None);
        assert_eq!(session.theme, Some(Theme::Dark));
        assert_eq!(session.archive.len(), 1);
    }

    #[test]
    fn test_verification_matches() {
        let verification = Verification::new("ann@example.org", "token-1");
        assert!(verification.matches("ann@example.org"));
        assert!(!verification.matches("Ann@example.org"));
        assert!(!Verification::new("ann@example.org", "").matches("ann@example.org"));
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let mut store = MemorySessionStore::new();
        assert_eq!(Session::load(&store).unwrap(), Session::default());

        signed_in().save(&mut store).unwrap();
        assert_eq!(Session::load(&store).unwrap(), signed_in());

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(dir.path().join("state").join("session.json"));

        assert_eq!(store.load().unwrap(), None);

        let session = signed_in();
        session.save(&mut store).unwrap();
        assert_eq!(Session::load(&store).unwrap(), session);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"sessionToken\": \"token-1\""));
        assert!(raw.contains("\"theme\": \"dark\""));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(Session::load(&store).unwrap(), Session::default());
    }

    #[test]
    fn test_partial_session_fills_defaults() {
        let session: Session = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(session.theme, Some(Theme::Light));
        assert!(session.archive.is_empty());
    }
}
