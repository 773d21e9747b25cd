//! `TaskboardServer`: Axum HTTP server for the task API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::response::Json;
use axum::routing::get;
use taskboard_settings::Environment;
use taskboard_store::TaskService;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::errors::{Result, ServerError};
use crate::handlers;
use crate::health::{self, HealthResponse};
use crate::shutdown::ShutdownCoordinator;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Task service backed by the pooled store.
    pub service: TaskService,
    /// Posture used when rendering 500 bodies.
    pub environment: Environment,
}

/// The taskboard HTTP server.
pub struct TaskboardServer {
    config: ServerConfig,
    service: TaskService,
    shutdown: Arc<ShutdownCoordinator>,
}

impl TaskboardServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, service: TaskService) -> Self {
        Self {
            config,
            service,
            shutdown: Arc::new(ShutdownCoordinator::new()),
        }
    }

    /// Build the Axum router with all routes and middleware.
    pub fn router(&self) -> Router {
        let state = AppState {
            service: self.service.clone(),
            environment: self.config.environment,
        };

        Router::new()
            .route("/health", get(health_handler))
            .route(
                "/api/tasks",
                get(handlers::list_tasks).post(handlers::create_task),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind the configured address and serve in a background task.
    ///
    /// Returns the bound address (useful with port `0`) and the serving
    /// task's handle. The task finishes once [`Self::shutdown`] is triggered
    /// and in-flight requests have drained.
    pub async fn listen(&self) -> Result<(SocketAddr, JoinHandle<()>)> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        info!(
            addr = %local_addr,
            environment = ?self.config.environment,
            "taskboard server listening"
        );

        let router = self.router();
        let token = self.shutdown.token();
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(token.cancelled_owned())
                .await
            {
                error!(error = %e, "server terminated with error");
            }
            info!("taskboard server stopped");
        });

        Ok((local_addr, handle))
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }
}

/// GET /health
async fn health_handler() -> Json<HealthResponse> {
    Json(health::health_check())
}
