//! Users endpoints
//!
//! `GET {prefix}/users/` lists every user, `GET {prefix}/users/:id` returns
//! one. Any lookup failure on the single-user route is reported as 404.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};

use crate::error::ApiError;
use crate::http::build_json_response;
use crate::logger;
use crate::routing::{PathParams, RouteTable};
use crate::store::UserSource;
use crate::validation::{ParamShape, ParamsValidator};

/// Message returned when a single-user lookup fails
pub const USER_NOT_FOUND: &str = "user does not exist";

const GET_USER_PARAMS: ParamsValidator = ParamsValidator::new(&[("id", ParamShape::String)]);

/// Handlers the route table dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListUsers,
    GetUser,
}

/// Build the route table with the users group mounted under `prefix`
pub fn routes(prefix: &str) -> RouteTable<Endpoint> {
    let users = RouteTable::new()
        .route(Method::GET, "/:id", Endpoint::GetUser)
        .route(Method::GET, "/", Endpoint::ListUsers);

    RouteTable::new().mount(prefix, RouteTable::new().mount("/users", users))
}

pub fn list_users(users: &dyn UserSource) -> Response<Full<Bytes>> {
    build_json_response(StatusCode::OK, &users.all())
}

pub fn get_user(
    params: &PathParams,
    users: &dyn UserSource,
) -> Result<Response<Full<Bytes>>, ApiError> {
    let params = GET_USER_PARAMS.validate(params)?;
    let id = params.get("id").ok_or(ApiError::Internal)?;

    let user = users.find(id).map_err(|e| {
        logger::log_debug(&format!("Lookup for '{id}' failed: {e}"));
        ApiError::not_found(USER_NOT_FOUND)
    })?;

    Ok(build_json_response(StatusCode::OK, &user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoutePattern;
    use crate::store::{InMemoryUsers, LookupError, User};

    struct FailingSource;

    impl UserSource for FailingSource {
        fn all(&self) -> Vec<User> {
            Vec::new()
        }

        fn find(&self, _id: &str) -> Result<User, LookupError> {
            Err(LookupError::Unavailable {
                reason: "backend down".to_string(),
            })
        }
    }

    fn id_params(path: &str) -> PathParams {
        RoutePattern::parse("/:id").matches(path).unwrap()
    }

    #[test]
    fn test_routes_order() {
        let table = routes("/api/v1");
        let hit = table.match_route(&Method::GET, "/api/v1/users/").unwrap();
        assert_eq!(*hit.handler, Endpoint::ListUsers);
        let hit = table.match_route(&Method::GET, "/api/v1/users/2").unwrap();
        assert_eq!(*hit.handler, Endpoint::GetUser);
    }

    #[test]
    fn test_custom_prefix() {
        let table = routes("/v2");
        assert!(table.match_route(&Method::GET, "/v2/users/1").is_some());
        assert!(table.match_route(&Method::GET, "/api/v1/users/1").is_none());
    }

    #[test]
    fn test_get_user_found() {
        let resp = get_user(&id_params("/1"), &InMemoryUsers::default()).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_get_user_missing() {
        let err = get_user(&id_params("/999"), &InMemoryUsers::default()).unwrap_err();
        assert_eq!(err, ApiError::not_found(USER_NOT_FOUND));
    }

    #[test]
    fn test_any_lookup_failure_is_not_found() {
        let err = get_user(&id_params("/1"), &FailingSource).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), USER_NOT_FOUND);
    }

    #[test]
    fn test_invalid_id_is_validation_error() {
        let err = get_user(&id_params("/%FF"), &InMemoryUsers::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }
}
