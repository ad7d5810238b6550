//! Session management module

pub mod client;
pub mod guard;
pub mod state;
pub mod store;

pub use client::{InvalidationRule, SessionClient};
pub use guard::{Capabilities, Navigator};
pub use state::{Session, SessionState, User, TOKEN_KEY, USER_KEY};
pub use store::{FileStore, MemoryStore, SessionStore};
