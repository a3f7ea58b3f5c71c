//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, dispatch to the
//! users endpoints, error rendering and access logging.

use std::net::SocketAddr;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use super::users::{self, Endpoint};
use crate::config::AppState;
use crate::error::ApiError;
use crate::http::build_error_response;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
///
/// Request bodies are never read, so any body type is accepted.
pub fn handle_request<B>(
    req: &Request<B>,
    state: &AppState,
    remote_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let response = dispatch(req, state);

    let logging = &state.config.logging;
    if logging.access_log {
        let mut entry = AccessLogEntry::from_request(req, remote_addr);
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.finish(response.status().as_u16(), body_bytes, started.elapsed());
        logger::log_access(&entry, &logging.access_log_format);
    }

    response
}

fn dispatch<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(hit) = state.routes.match_route(req.method(), req.uri().path()) else {
        logger::log_debug(&format!(
            "No route for {} {}",
            req.method(),
            req.uri().path()
        ));
        return build_error_response(&ApiError::RouteNotFound);
    };

    let result = match hit.handler {
        Endpoint::ListUsers => Ok(users::list_users(state.users.as_ref())),
        Endpoint::GetUser => users::get_user(&hit.params, state.users.as_ref()),
    };

    result.unwrap_or_else(|err| build_error_response(&err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{InMemoryUsers, LookupError, User, UserSource};
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts lookups so tests can prove validation short-circuits
    struct CountingSource {
        inner: InMemoryUsers,
        lookups: AtomicUsize,
    }

    impl UserSource for CountingSource {
        fn all(&self) -> Vec<User> {
            self.inner.all()
        }

        fn find(&self, id: &str) -> Result<User, LookupError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find(id)
        }
    }

    fn test_config() -> Config {
        let mut cfg = Config::load_from("/nonexistent/users-api-config").unwrap();
        cfg.logging.access_log = false;
        cfg
    }

    fn state() -> AppState {
        AppState::new(test_config()).unwrap()
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn get(state: &AppState, uri: &str) -> Response<Full<Bytes>> {
        let req = Request::get(uri).body(()).unwrap();
        handle_request(&req, state, peer())
    }

    async fn json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_users() {
        let state = state();
        let resp = get(&state, "/api/v1/users/");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json(resp).await,
            serde_json::json!([{"id": "1", "name": "Bob"}, {"id": "2", "name": "Alice"}])
        );
    }

    #[tokio::test]
    async fn test_list_users_without_trailing_slash() {
        let state = state();
        let resp = get(&state, "/api/v1/users");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json(resp).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_each_user() {
        let state = state();
        for (id, name) in [("1", "Bob"), ("2", "Alice")] {
            let resp = get(&state, &format!("/api/v1/users/{id}"));
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                json(resp).await,
                serde_json::json!({"id": id, "name": name})
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let state = state();
        for id in ["3", "999"] {
            let resp = get(&state, &format!("/api/v1/users/{id}"));
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                json(resp).await,
                serde_json::json!({"error": {"status": 404, "message": "user does not exist"}})
            );
        }
    }

    #[tokio::test]
    async fn test_validation_failure_skips_lookup() {
        let source = Arc::new(CountingSource {
            inner: InMemoryUsers::default(),
            lookups: AtomicUsize::new(0),
        });
        let state = AppState::with_source(test_config(), source.clone());

        let resp = get(&state, "/api/v1/users/%E0%A4");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json(resp).await;
        assert_eq!(body["error"]["message"], "Validation error");
        assert_eq!(body["error"]["data"][0]["param"], "id");
        assert_eq!(source.lookups.load(Ordering::SeqCst), 0);

        let resp = get(&state, "/api/v1/users/1");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(source.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unmatched_routes() {
        let state = state();
        for uri in ["/", "/api/v1", "/api/v2/users/1", "/api/v1/users/1/extra"] {
            let resp = get(&state, uri);
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(json(resp).await["error"]["message"], "Route not found");
        }
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let state = state();
        let req = Request::post("/api/v1/users/1").body(()).unwrap();
        let resp = handle_request(&req, &state, peer());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(resp).await["error"]["message"], "Route not found");
    }

    #[tokio::test]
    async fn test_repeated_requests_identical() {
        let state = state();
        let first = json(get(&state, "/api/v1/users/")).await;
        for _ in 0..5 {
            assert_eq!(json(get(&state, "/api/v1/users/")).await, first);
        }
        let missing = json(get(&state, "/api/v1/users/999")).await;
        assert_eq!(json(get(&state, "/api/v1/users/999")).await, missing);
    }

    #[tokio::test]
    async fn test_empty_source_lists_empty_array() {
        let mut cfg = test_config();
        cfg.users = Some(Vec::new());
        let state = AppState::new(cfg).unwrap();
        let resp = get(&state, "/api/v1/users/");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json(resp).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_configured_users() {
        let mut cfg = test_config();
        cfg.users = Some(vec![User::new("a-1", "Grace"), User::new("b-2", "Linus")]);
        let state = AppState::new(cfg).unwrap();
        let resp = get(&state, "/api/v1/users/b-2");
        assert_eq!(
            json(resp).await,
            serde_json::json!({"id": "b-2", "name": "Linus"})
        );
        let resp = get(&state, "/api/v1/users/1");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
