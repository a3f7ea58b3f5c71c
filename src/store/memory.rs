// In-memory user source
// Ordered vector plus an id index built once at construction

use std::collections::HashMap;

use super::{LookupError, StoreError, User, UserSource};

/// Immutable, ordered set of users
#[derive(Debug, Clone)]
pub struct InMemoryUsers {
    users: Vec<User>,
    index: HashMap<String, usize>,
}

impl InMemoryUsers {
    /// Build a source from records in the order given
    pub fn new(users: Vec<User>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(users.len());
        for (pos, user) in users.iter().enumerate() {
            if index.insert(user.id.clone(), pos).is_some() {
                return Err(StoreError::DuplicateId {
                    id: user.id.clone(),
                });
            }
        }
        Ok(Self { users, index })
    }
}

impl Default for InMemoryUsers {
    /// Built-in dataset used when no users are configured
    fn default() -> Self {
        let users = vec![User::new("1", "Bob"), User::new("2", "Alice")];
        let index = users
            .iter()
            .enumerate()
            .map(|(pos, user)| (user.id.clone(), pos))
            .collect();
        Self { users, index }
    }
}

impl UserSource for InMemoryUsers {
    fn all(&self) -> Vec<User> {
        self.users.clone()
    }

    fn find(&self, id: &str) -> Result<User, LookupError> {
        self.index
            .get(id)
            .map(|&pos| self.users[pos].clone())
            .ok_or_else(|| LookupError::NotFound { id: id.to_string() })
    }
}
