use std::{io::ErrorKind, path::PathBuf};

use crate::{
    Res, config,
    types::{Session, UserProfile},
    warning,
};

/// Owner of the signed-in session.
///
/// The store is the only place a [`Session`] is mutated. Everything else
/// borrows it read-only through [`SessionStore::session`]. It keeps a copy on
/// disk so a new process picks up where the previous one left off.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    session: Session,
}

impl SessionStore {
    /// An empty store backed by `path`. Nothing is read from disk.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            session: Session::default(),
        }
    }

    /// Loads the session persisted in the local data directory.
    pub async fn load() -> Res<Self> {
        Self::load_from(Self::session_path()).await
    }

    /// Loads the session persisted at `path`.
    ///
    /// A missing file yields an empty session, which is what a fresh start
    /// looks like.
    pub async fn load_from(path: PathBuf) -> Res<Self> {
        let session = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Session::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, session })
    }

    /// Loads the persisted session, starting over when it cannot be read.
    ///
    /// Used by the commands that replace or drop the session anyway, so a
    /// damaged file never locks the user out of signing in again.
    pub async fn load_or_reset() -> Self {
        Self::load_or_reset_from(Self::session_path()).await
    }

    pub async fn load_or_reset_from(path: PathBuf) -> Self {
        match Self::load_from(path.clone()).await {
            Ok(store) => store,
            Err(e) => {
                warning!(
                    "Ignoring unreadable session file {}: {}",
                    path.display(),
                    e
                );
                Self::new(path)
            }
        }
    }

    /// Writes the session to disk.
    ///
    /// The JSON goes to a sibling temp file first and is then renamed over
    /// the session file, so an interrupted write leaves the old file intact.
    pub async fn persist(&self) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.session)?;
        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;

        if let Err(e) = async_fs::rename(&tmp, &self.path).await {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Removes the persisted copy. An already absent file is fine.
    pub async fn forget(&self) -> Res<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.session.token = Some(token.into());
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.session.user = Some(user);
    }

    /// Drops token and profile alike.
    pub fn clear(&mut self) {
        self.session = Session::default();
    }

    pub(crate) fn restore(&mut self, session: Session) {
        self.session = session;
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn session_path() -> PathBuf {
        config::data_dir().join("session.json")
    }
}

impl Session {
    /// True iff a non-empty token is present. The profile is not consulted.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
