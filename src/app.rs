use crate::{api, err::Error, timestamp::TimestampResolver, web::routes, SharedState};
use axum::{handler::HandlerWithoutStateExt, routing::get, Router};
use axum_server::Handle;
use std::{
    net::{SocketAddr, TcpListener},
    path::PathBuf,
    time::Duration,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

/// How long in-flight requests get to finish once a shutdown signal arrives.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// The main application object
pub struct App {
    shared_state: SharedState,
    public_dir: PathBuf,
}

impl App {
    /// Create a new application object
    ///
    /// # Arguments
    /// * `resolver` - The timestamp resolver shared by all requests
    /// * `public_dir` - The directory static files are served from
    pub fn new(resolver: TimestampResolver, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            shared_state: SharedState { resolver },
            public_dir: public_dir.into(),
        }
    }

    /// Build the router: the timestamp API, the root page, static files and the 404 fallback,
    /// with permissive CORS and request tracing on every response.
    pub fn router(&self) -> Router {
        let static_files = ServeDir::new(&self.public_dir)
            .call_fallback_on_method_not_allowed(true)
            .not_found_service(routes::unknown_route.into_service());

        Router::new()
            .route("/", get(routes::root))
            .route("/api/timestamp", get(api::timestamp::current))
            .route("/api/timestamp/", get(api::timestamp::current))
            .route("/api/timestamp/:timestamp", get(api::timestamp::timestamp))
            .with_state(self.shared_state.clone())
            .fallback_service(static_files)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
    }

    /// Start a server and serve until a shutdown signal is received
    ///
    /// # Arguments
    /// * `address` - The address to bind to
    ///
    /// # Returns
    /// * `Ok(())` if the server exited successfully
    /// * An error if binding or serving failed
    pub async fn serve(self, address: SocketAddr) -> Result<(), Error> {
        let router = self.router();

        let listener = TcpListener::bind(address)?;
        listener.set_nonblocking(true)?;

        info!("Listening on: http://{}", listener.local_addr()?);

        let handle = Handle::new();
        tokio::spawn(shutdown_signal(handle.clone()));

        axum_server::from_tcp(listener)
            .handle(handle)
            .serve(router.into_make_service())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Error installing SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;

    info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
