//! Routing module
//!
//! Provides method + path-pattern routing:
//! - Patterns made of literal and `:name` parameter segments
//! - Route groups mounted under a shared prefix
//! - First match in registration order wins

mod matcher;
mod pattern;

pub use matcher::{RouteMatch, RouteTable};
pub use pattern::{PathParams, RoutePattern};
