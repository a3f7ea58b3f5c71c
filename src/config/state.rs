// Application state module
// Owns the configuration, the injected user source and the route table

use std::sync::Arc;

use super::types::Config;
use crate::handler::{self, Endpoint};
use crate::routing::RouteTable;
use crate::store::{InMemoryUsers, StoreError, UserSource};

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserSource>,
    pub routes: RouteTable<Endpoint>,
}

impl AppState {
    /// Build state from configuration, seeding the in-memory source from
    /// `config.users` or the built-in dataset
    pub fn new(config: Config) -> Result<Self, StoreError> {
        let users = match &config.users {
            Some(seed) => InMemoryUsers::new(seed.clone())?,
            None => InMemoryUsers::default(),
        };
        Ok(Self::with_source(config, Arc::new(users)))
    }

    /// Build state around an existing user source
    pub fn with_source(config: Config, users: Arc<dyn UserSource>) -> Self {
        let routes = handler::routes(&config.api.prefix);
        Self {
            config,
            users,
            routes,
        }
    }
}
