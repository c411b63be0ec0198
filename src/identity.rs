//! Anonymous device identity.
//!
//! The first call to [`IdentityService::get_or_create_identity`] restores the
//! persisted [`User`] or generates and persists a new one. Storage problems are
//! never fatal: the session falls back to an identity that lives in memory only.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::ids;
use crate::models::User;

/// Visually distinct colors handed out to anonymous users.
pub const PALETTE: [&str; 15] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FECA57",
    "#FF9FF3", "#54A0FF", "#5F27CD", "#00D2D3", "#FF9F43",
    "#DDA0DD", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E9",
];

/// Upper bound (exclusive) of the number in `Anonymous<N>`.
pub const NAME_SUFFIX_RANGE: u32 = 1000;

#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    #[error("identity storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("malformed identity record: {0}")]
    Malformed(String),
}

pub trait IdentityStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<User>, IdentityError>;
    fn save(&self, user: &User) -> Result<(), IdentityError>;
}

/// Single JSON file holding the serialized user.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, e: std::io::Error) -> IdentityError {
        IdentityError::StorageUnavailable(format!("{}: {e}", self.path.display()))
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<User>, IdentityError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.unavailable(e)),
        };
        serde_json::from_slice::<User>(&bytes)
            .map(Some)
            .map_err(|e| IdentityError::Malformed(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, user: &User) -> Result<(), IdentityError> {
        let bytes = serde_json::to_vec_pretty(user)
            .map_err(|e| IdentityError::StorageUnavailable(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.unavailable(e))?;
        }
        std::fs::write(&self.path, bytes).map_err(|e| self.unavailable(e))
    }
}

/// Keeps the record in process memory; shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    slot: Arc<Mutex<Option<User>>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(user))) }
    }

    pub fn stored(&self) -> Option<User> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> IdentityError {
    IdentityError::StorageUnavailable(e.to_string())
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<User>, IdentityError> {
        let slot = self.slot.lock().map_err(poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, user: &User) -> Result<(), IdentityError> {
        let mut slot = self.slot.lock().map_err(poisoned)?;
        *slot = Some(user.clone());
        Ok(())
    }
}

/// Builds a fresh anonymous identity.
pub fn generate_identity<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> User {
    let suffix = rng.gen_range(0..NAME_SUFFIX_RANGE);
    let color = PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]);
    User {
        id: ids::user_id(now),
        display_name: format!("Anonymous{suffix}"),
        color: color.to_string(),
        joined_at: now,
    }
}

#[derive(Debug, Clone)]
struct Session {
    user: User,
    persisted: bool,
}

pub struct IdentityService {
    store: Arc<dyn IdentityStore>,
    session: OnceLock<Session>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store, session: OnceLock::new() }
    }

    /// Returns the device identity, creating and persisting it on first use.
    /// Later calls return the same user without touching storage.
    pub fn get_or_create_identity(&self) -> User {
        self.session.get_or_init(|| self.resolve()).user.clone()
    }

    /// True when the identity could not be written and only lives for this session.
    pub fn is_ephemeral(&self) -> bool {
        self.session.get().map(|s| !s.persisted).unwrap_or(false)
    }

    fn resolve(&self) -> Session {
        let can_persist = match self.store.load() {
            Ok(Some(user)) => {
                info!(user_id = %user.id, display_name = %user.display_name, "restored identity");
                return Session { user, persisted: true };
            }
            Ok(None) => true,
            Err(e @ IdentityError::Malformed(_)) => {
                warn!("{e}; generating a new identity");
                true
            }
            Err(e @ IdentityError::StorageUnavailable(_)) => {
                warn!("{e}; identity will not outlive this session");
                false
            }
        };

        let user = generate_identity(&mut rand::thread_rng(), Utc::now());
        let persisted = can_persist
            && match self.store.save(&user) {
                Ok(()) => true,
                Err(e) => {
                    warn!("{e}; identity will not outlive this session");
                    false
                }
            };
        info!(user_id = %user.id, display_name = %user.display_name, persisted, "created identity");
        Session { user, persisted }
    }
}
