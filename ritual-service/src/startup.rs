//! Application startup and lifecycle management.

use crate::config::RitualConfig;
use crate::handlers::{self, health_check, metrics_endpoint, readiness_check};
use crate::services::{FcmProvider, MockPushProvider, PushProvider, RitualDb, RitualStore};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. Handles are created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RitualStore>,
    pub push_provider: Arc<dyn PushProvider>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/users", get(handlers::users::list_users))
        .route("/api/user", post(handlers::users::create_user))
        .route("/api/user/:fcm_token", get(handlers::users::get_user))
        .route(
            "/api/notification/send",
            post(handlers::notifications::send_notification),
        )
        .route("/api/rituals", get(handlers::rituals::list_rituals))
        .route("/api/ritual", post(handlers::rituals::create_ritual))
        .route(
            "/api/ritual-record",
            post(handlers::records::create_ritual_record),
        )
        .route(
            "/api/ritual/:ritual_id/records",
            get(handlers::records::list_ritual_records),
        )
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RitualConfig) -> Result<Self, AppError> {
        let db = RitualDb::connect(&config.database).await.map_err(|e| {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            AppError::from(e)
        })?;

        if config.database.run_migrations {
            db.run_migrations().await.map_err(|e| {
                tracing::error!("Failed to run database migrations: {}", e);
                AppError::from(e)
            })?;
        }

        let push_provider: Arc<dyn PushProvider> = if config.fcm.enabled {
            let provider = FcmProvider::new(config.fcm.clone()).map_err(|e| {
                tracing::error!("Failed to initialize FCM provider: {}", e);
                AppError::ConfigError(anyhow::anyhow!(e.to_string()))
            })?;
            tracing::info!(project_id = %config.fcm.project_id, "FCM push provider initialized");
            Arc::new(provider)
        } else {
            tracing::info!("FCM provider disabled, using mock push provider");
            Arc::new(MockPushProvider::new(true))
        };

        let state = AppState {
            store: Arc::new(db),
            push_provider,
        };

        Self::with_state(config.common.port, state).await
    }

    /// Bind a listener for an already assembled state (port 0 = random port).
    pub async fn with_state(port: u16, state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Ritual service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Run until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
