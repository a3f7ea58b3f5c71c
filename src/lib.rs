//! Users API
//!
//! A small HTTP service exposing read-only user lookups under a versioned
//! prefix:
//!
//! - `GET /api/v1/users/` lists every user
//! - `GET /api/v1/users/:id` returns one user, or 404 `user does not exist`

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
pub mod store;
pub mod validation;
