//! Request handler module
//!
//! Route table construction, request dispatch and the users endpoints.

pub mod router;
pub mod users;

pub use router::handle_request;
pub use users::{routes, Endpoint};
