//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, session)
//! - Build the form router and its collaborators from configuration
//! - Bind server to listener and shut down gracefully
//! - Observability (metrics, correlation IDs)

use axum::{
    body::Body,
    extract::{Extension, State},
    http::{HeaderName, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{PortalConfig, RouterConfig};
use crate::form::FormRouter;
use crate::http::request::{form_request, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::render::{FilesystemPageRenderer, PageRenderer};
use crate::security::{session_middleware, InMemorySessionStore, Session, SessionState, SessionStore};
use crate::service::{InMemoryFormService, ProcessFormService};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<FormRouter>,
    pub portal: PortalConfig,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// HTTP server for the form router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a server backed by the in-memory service, filesystem pages and
    /// configured sessions.
    pub fn new(config: RouterConfig) -> Self {
        let service = Arc::new(InMemoryFormService::from_catalog(&config.catalog));
        let renderer = Arc::new(FilesystemPageRenderer::new(
            &config.pages.directory,
            &config.portal.default_locale,
        ));
        let sessions = Arc::new(InMemorySessionStore::from_config(&config.session));
        Self::with_collaborators(config, service, renderer, sessions)
    }

    /// Create a server around externally provided collaborators.
    pub fn with_collaborators(
        config: RouterConfig,
        service: Arc<dyn ProcessFormService>,
        renderer: Arc<dyn PageRenderer>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let state = AppState {
            router: Arc::new(FormRouter::new(service, renderer)),
            portal: config.portal.clone(),
        };
        let session_state = SessionState {
            store: sessions,
            cookie_name: config.session.cookie_name.clone(),
        };

        let router = Self::build_router(&config, state, session_state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState, session_state: SessionState) -> Router {
        let mount = config.portal.mount_path();
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        let forms = Router::new()
            .route(&mount, get(form_handler))
            .route(&format!("{}/", mount), get(form_handler))
            .route(&format!("{}/{{*path}}", mount), get(form_handler))
            .layer(middleware::from_fn_with_state(session_state, session_middleware))
            .with_state(state);

        Router::new()
            .route("/health", get(health_handler))
            .merge(forms)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// Run the server until Ctrl+C or the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount = %self.config.portal.mount_path(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Resolve a form request.
async fn form_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let (parts, _body) = request.into_parts();
    let form_request = form_request(&parts, &state.portal);

    tracing::debug!(
        path_info = %form_request.path_info,
        user_id = session.user_id,
        "Resolving form"
    );

    // Collaborators may block (filesystem, engine calls)
    let router = state.router.clone();
    let handled = tokio::task::spawn_blocking(move || router.handle(&form_request, &session)).await;

    match handled {
        Ok(response) => {
            metrics::record_request(response.outcome(), response.status().as_u16(), start_time);
            response.into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Form handler task failed");
            metrics::record_request("error", 500, start_time);
            (StatusCode::INTERNAL_SERVER_ERROR, "Form request failed").into_response()
        }
    }
}

async fn health_handler() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}
