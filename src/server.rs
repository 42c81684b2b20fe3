use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::{ApiError, AppState, ProblemTypes, create_student};

/// Render a handler panic as the generic 500 problem
fn panic_handler(
    problems: ProblemTypes,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |err: Box<dyn Any + Send + 'static>| {
        let msg = err
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| err.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic");
        error!("Handler panicked: {}", msg);
        ApiError::Unexpected(msg.to_string())
            .into_problem(&problems, None)
            .into_response()
    }
}

/// Build the HTTP router with the given state
pub fn build_router(state: AppState) -> Router {
    let problems = state.problems.clone();
    Router::new()
        .route("/students", post(create_student))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_handler(problems)))
        .layer(TraceLayer::new_for_http())
}

/// HTTP server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
}

impl Server {
    /// Create and bind the HTTP server to the specified address
    pub async fn bind(addr: &str, state: AppState) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server bound to {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            router: build_router(state),
        })
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve requests until the process is interrupted
    pub async fn run(self) -> std::io::Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve requests until `shutdown` resolves, then drain in-flight requests
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Server started, listening on {}", self.local_addr);
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
