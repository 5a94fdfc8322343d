use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::{DashboardRepository, DatabaseError, DatabaseManager};
use crate::handlers::{auth, dashboards, health::health};
use crate::middleware::jwt_auth_middleware;
use crate::services::{AuthService, DashboardService};

/// Shared handles passed to every handler through `State<Arc<AppState>>`
pub struct AppState {
    pub pool: SqlitePool,
    pub dashboards: DashboardService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        Self {
            dashboards: DashboardService::new(DashboardRepository::new(pool.clone())),
            auth: AuthService::new(pool.clone(), &config.security),
            pool,
        }
    }

    /// Open the store described by `config` and wire the services onto it
    pub async fn connect(config: &AppConfig) -> Result<Arc<Self>, DatabaseError> {
        let pool = DatabaseManager::connect(&config.database).await?;
        Ok(Arc::new(Self::new(pool, config)))
    }
}

pub fn app(state: Arc<AppState>, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .merge(auth_routes(state.clone()))
        .merge(dashboard_routes(&config.dashboards_path()))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(auth::register_post))
        .route("/token", post(auth::token_post))
        .route(
            "/protected",
            get(auth::protected_get)
                .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware)),
        )
}

/// Collection served with and without the trailing slash
fn dashboard_routes(base: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            base,
            get(dashboards::dashboards_get).post(dashboards::dashboard_post),
        )
        .route(
            &format!("{}/", base),
            get(dashboards::dashboards_get).post(dashboards::dashboard_post),
        )
        .route(
            &format!("{}/:id", base),
            get(dashboards::dashboard_get)
                .put(dashboards::dashboard_put)
                .delete(dashboards::dashboard_delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}

/// Connect, bind `0.0.0.0:{api.port}` and serve until ctrl-c
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::connect(&config)
        .await
        .context("failed to open database")?;
    let app = app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!(
        "Turnilo dashboards API listening on http://{}{}",
        bind_addr,
        config.dashboards_path()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app(url_path: &str) -> Router {
        let mut config = AppConfig::development();
        config.database.url = "sqlite::memory:".to_string();
        config.api.url_path = url_path.to_string();
        let state = AppState::connect(&config).await.unwrap();
        app(state, &config)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn collection_is_served_with_and_without_trailing_slash() {
        let app = test_app("/rest").await;

        for uri in ["/rest/turnilo/dashboards", "/rest/turnilo/dashboards/"] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_json(response).await, json!([]));
        }
    }

    #[tokio::test]
    async fn url_path_prefix_is_configurable() {
        let app = test_app("/api/v2").await;

        let response = app
            .clone()
            .oneshot(Request::get("/api/v2/turnilo/dashboards").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/rest/turnilo/dashboards").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_database_ok() {
        let app = test_app("/rest").await;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok", "database": "ok"}));
    }

    #[tokio::test]
    async fn protected_without_token_is_challenged() {
        let app = test_app("/rest").await;

        let response = app
            .oneshot(Request::get("/protected").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["www-authenticate"], "Bearer");
    }

    async fn preflight(app: Router, origin: &str) -> axum::response::Response {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/rest/turnilo/dashboards")
            .header("origin", origin)
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn app_with_origins(origins: &[&str]) -> Router {
        let mut config = AppConfig::development();
        config.database.url = "sqlite::memory:".to_string();
        config.security.cors_origins = origins.iter().map(|o| o.to_string()).collect();
        let state = AppState::connect(&config).await.unwrap();
        app(state, &config)
    }

    #[tokio::test]
    async fn cors_allows_only_configured_origins() {
        let app = app_with_origins(&["http://localhost:9090", "bad\norigin"]).await;

        let response = preflight(app.clone(), "http://localhost:9090").await;
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:9090"
        );

        let response = preflight(app, "http://evil.example.com").await;
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn cors_wildcard_allows_any_origin() {
        let app = app_with_origins(&["*"]).await;

        let response = preflight(app, "http://anywhere.example.com").await;
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
