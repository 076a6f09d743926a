use axum::{
    Router,
    extract::{MatchedPath, Request},
    routing::{get, post, put},
};
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};

use std::{path::Path, sync::Arc};

use crate::{analytics, entries, export};
use engine::Engine;

/// Prefix under which the static front end is served.
pub const STATIC_PREFIX: &str = "/web";

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Build the application router: the JSON API under `/api` and the static
/// files of `static_dir` under [`STATIC_PREFIX`].
pub fn router(state: ServerState, static_dir: impl AsRef<Path>) -> Router {
    let api = Router::new()
        .route("/items", post(entries::create).get(entries::list))
        .route("/items/{id}", put(entries::update).delete(entries::delete))
        .route("/analytics", get(analytics::get_analytics))
        .route("/export", get(export::export_csv))
        .with_state(state);

    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // 5xx responses are already logged by `ServerError`.
        .on_failure(());

    Router::new()
        .nest("/api", api)
        .nest_service(STATIC_PREFIX, ServeDir::new(static_dir.as_ref()))
        .layer(tracing_layer)
}

pub async fn run_with_listener(
    engine: Engine,
    static_dir: impl AsRef<Path>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState::new(engine);
    axum::serve(listener, router(state, static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received ctrl+c signal."),
        _ = terminate => tracing::debug!("Received terminate signal."),
    }
}
