//! Access Control Middleware.
//! Enforces the per-level `X-Password` header.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::quest::QuestError;

pub const X_PASSWORD: &str = "x-password";

/// The password a single level is locked with.
#[derive(Clone, Debug)]
pub struct PasswordGate {
    password: Arc<str>,
}

impl PasswordGate {
    pub fn new(password: impl Into<Arc<str>>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Exact, byte-wise comparison of the header against the level password.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), QuestError> {
        let provided = match headers.get(X_PASSWORD) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(QuestError::PasswordRequired),
        };

        if provided.as_bytes() != self.password.as_bytes() {
            return Err(QuestError::PasswordWrong);
        }

        Ok(())
    }
}

pub async fn require_password(
    State(gate): State<PasswordGate>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match gate.check(req.headers()) {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn headers(password: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(p) = password {
            headers.insert(X_PASSWORD, p.parse().unwrap());
        }
        headers
    }

    #[test]
    fn test_check() {
        let gate = PasswordGate::new("open-sesame");

        assert!(matches!(gate.check(&headers(None)), Err(QuestError::PasswordRequired)));
        assert!(matches!(gate.check(&headers(Some(""))), Err(QuestError::PasswordRequired)));
        assert!(matches!(gate.check(&headers(Some("Open-Sesame"))), Err(QuestError::PasswordWrong)));
        assert!(gate.check(&headers(Some("open-sesame"))).is_ok());
    }

    #[tokio::test]
    async fn test_middleware_wraps_handler_unchanged() {
        let app = Router::new()
            .route("/", get(|| async { (StatusCode::IM_A_TEAPOT, "inner") }))
            .layer(middleware::from_fn_with_state(
                PasswordGate::new("open-sesame"),
                require_password,
            ));

        let denied = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let allowed = app
            .oneshot(
                Request::get("/")
                    .header("x-PASSWORD", "open-sesame")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(allowed.status(), StatusCode::IM_A_TEAPOT);
        let body = axum::body::to_bytes(allowed.into_body(), 64).await.unwrap();
        assert_eq!(&body[..], b"inner");
    }
}
