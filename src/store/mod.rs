//! User data source
//!
//! The dataset is provisioned once at startup and never mutated afterwards,
//! so concurrent requests read it without any locking.

mod memory;

pub use memory::InMemoryUsers;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user record as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Failure of a single lookup
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("user not found: {id}")]
    NotFound { id: String },

    #[error("user source unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Failure while building a data source
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate user id: {id}")]
    DuplicateId { id: String },
}

/// Read-only source of users
///
/// `all` must return users in insertion order.
pub trait UserSource: Send + Sync {
    fn all(&self) -> Vec<User>;

    fn find(&self, id: &str) -> Result<User, LookupError>;
}
