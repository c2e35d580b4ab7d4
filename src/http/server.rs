//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the public endpoints and all levels
//! - Lock each level behind its password and its single allowed method
//! - Wire up middleware (request ID outermost, then tracing, timeout, body limit)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    handler::Handler,
    http::{Request, StatusCode},
    middleware,
    routing::{get, on},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{validate_config, ConfigError, QuestConfig};
use crate::http::endpoints;
use crate::http::levels;
use crate::http::middleware::{require_password, track_level, PasswordGate};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::quest::{Level, Vault};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub vault: Arc<Vault>,
}

/// HTTP server for the quest.
pub struct HttpServer {
    router: Router,
    config: QuestConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the configuration does not validate, so a broken quest never
    /// starts serving.
    pub fn new(config: QuestConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let state = AppState {
            vault: Arc::new(Vault::from(&config)),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &QuestConfig, state: AppState) -> Router {
        let levels = LevelRoutes::new(&state.vault)
            .level(Level::Plain, levels::plain)
            .level(Level::Reverse, levels::reverse)
            .level(Level::Base64, levels::base64)
            .level(Level::Header, levels::header)
            .level(Level::Delete, levels::delete)
            .level(Level::UserAgent, levels::user_agent)
            .level(Level::AcceptLanguage, levels::accept_language)
            .level(Level::Redirect, levels::redirect)
            .level(Level::Robots, levels::robots)
            .level(Level::GuessNumber, levels::guess_number)
            .level(Level::Mask, levels::mask)
            .level(Level::Finish, levels::finish)
            .into_router();

        Router::new()
            .route("/", get(endpoints::home))
            .route("/robots.txt", get(endpoints::robots_txt))
            .merge(levels)
            .fallback(not_found)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %req.request_id(),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for serving or for driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            levels = Level::ALL.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &QuestConfig {
        &self.config
    }
}

/// Accumulates one gated route per level.
struct LevelRoutes<'a> {
    router: Router<AppState>,
    vault: &'a Vault,
}

impl<'a> LevelRoutes<'a> {
    fn new(vault: &'a Vault) -> Self {
        Self {
            router: Router::new(),
            vault,
        }
    }

    /// Mount `handler` at the level's path, for the level's method only,
    /// behind the level's password.
    fn level<H, T>(mut self, level: Level, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        let gate = PasswordGate::new(self.vault.password(level));

        let route = on(level.method_filter(), handler)
            .route_layer(middleware::from_fn_with_state(level, track_level))
            .route_layer(middleware::from_fn_with_state(gate, require_password))
            .fallback(levels::method_not_allowed);

        self.router = self.router.route(&level.path(), route);
        self
    }

    fn into_router(self) -> Router<AppState> {
        self.router
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::new(QuestConfig::default()).unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = server().router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = QuestConfig::default();
        config.secrets.redirect_chain.clear();
        assert!(matches!(HttpServer::new(config), Err(ConfigError::Validation(_))));
    }

    #[tokio::test]
    async fn test_wrong_method_beats_missing_password() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/level/1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            send(request).await,
            (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
        );
    }

    #[tokio::test]
    async fn test_head_is_served_for_get_levels() {
        let request = Request::builder()
            .method(Method::HEAD)
            .uri("/level/1")
            .header("x-password", "Bz7qKx2mWd")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_endpoints_and_fallback() {
        let (status, body) = send(Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ends_with("Password: Bz7qKx2mWd\n"));

        let (status, body) = send(Request::get("/robots.txt").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("# Secret: b8a1f3d2e9c4"));

        let (status, body) = send(Request::get("/nowhere").body(Body::empty()).unwrap()).await;
        assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, "Not Found"));
    }

    #[tokio::test]
    async fn test_oversized_body_is_refused() {
        let mut config = QuestConfig::default();
        config.security.max_body_size = 16;
        let router = HttpServer::new(config).unwrap().router();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/level/9")
            .header("x-password", "e4NuPz6hCw")
            .body(Body::from(format!(r#"{{"secret": "{}"}}"#, "x".repeat(64))))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
