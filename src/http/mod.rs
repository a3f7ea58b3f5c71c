//! HTTP response layer module
//!
//! Builds JSON responses, decoupled from routing and handlers.

pub mod response;

pub use response::{build_error_response, build_json_response};
