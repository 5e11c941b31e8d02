//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding fallback
//! - Wire up middleware (locale dispatch, tracing, limits, request ID)
//! - Bind server to listener
//! - Shut down gracefully on the lifecycle signal

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::middleware::locale_middleware;
use crate::http::request::UuidRequestId;
use crate::http::upstream::{forward_handler, Upstream};
use crate::lifecycle::ShutdownSignal;
use crate::locale::{LocaleDispatcher, OperatingMode};

/// Errors raised while building the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid upstream address {address:?}: {source}")]
    Upstream {
        address: String,
        source: axum::http::uri::InvalidUri,
    },
}

/// HTTP server for the locale gateway.
pub struct HttpServer {
    router: Router,
    mode: OperatingMode,
    upstream_address: String,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and dispatcher.
    pub fn new(config: GatewayConfig, dispatcher: LocaleDispatcher) -> Result<Self, ServerError> {
        let upstream = Upstream::new(&config.upstream.address).map_err(|source| ServerError::Upstream {
            address: config.upstream.address.clone(),
            source,
        })?;
        let mode = dispatcher.mode();

        let router = Self::build_router(&config, upstream, Arc::new(dispatcher));
        Ok(Self {
            router,
            mode,
            upstream_address: config.upstream.address,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, upstream: Upstream, dispatcher: Arc<LocaleDispatcher>) -> Router {
        Router::new()
            .fallback(forward_handler)
            .with_state(upstream)
            .layer(middleware::from_fn_with_state(dispatcher, locale_middleware))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = %self.mode,
            upstream = %self.upstream_address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
