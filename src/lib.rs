pub mod categories;
pub mod config;
pub mod error;
pub mod identity;
pub mod ids;
pub mod models;
pub mod seed;
pub mod store;
pub mod validate;

// Re-export commonly used items for tests / external users
pub use config::Config;
pub use error::LobbyError;
pub use identity::{FileIdentityStore, IdentityService, IdentityStore, MemoryIdentityStore};
pub use store::{Command, DiscussionStore, StoreError};
