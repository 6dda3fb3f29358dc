//! # HTTP Adapter
//!
//! Read-only inventory lookups over HTTP, plus an optional self-registration
//! endpoint for hosts.
//!
//! | Route | Answers with |
//! |---|---|
//! | `/hosts`, `/hosts/{network}` | host listing |
//! | `/host/{host}` | one host, or a per-host file with `?file=ext` |
//! | `/networks`, `/network/{network}` | network listing |
//! | `/ip/{ip}`, `/mac/{mac}` | hosts by address |
//! | `/` | the index file, when configured |
//! | `/register` | adds a host, when a registration key is configured |
//!
//! Listings take `json=y`, `header=y` and `mac=y` query flags. [`serve_tls`]
//! answers the same routes over HTTPS.

mod error;
mod handlers;
mod middleware;
mod state;

use std::io;
use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::routing::get;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tracing::{debug, info};

pub use error::ApiError;
pub use state::AppState;

/// Builds the router. Optional routes are only mounted when configured.
pub fn router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/hosts", get(handlers::hosts))
        .route("/hosts/{network}", get(handlers::hosts_in_network))
        .route("/host/{host}", get(handlers::host))
        .route("/networks", get(handlers::networks))
        .route("/network/{network}", get(handlers::network))
        .route("/ip/{ip}", get(handlers::hosts_by_address))
        .route("/mac/{mac}", get(handlers::hosts_by_mac));

    if state.config().index_file.is_some() {
        router = router.route("/", get(handlers::index));
    }
    if state.config().registration_key.is_some() {
        router = router.route("/register", get(handlers::register));
    }

    router
        .layer(axum::middleware::from_fn(middleware::log_request))
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Serving inventory on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

/// Loads the PEM certificate chain and private key used by [`serve_tls`].
pub async fn tls_config(cert: &Path, key: &Path) -> io::Result<RustlsConfig> {
    for (what, path) in [("certificate", cert), ("key", key)] {
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("TLS {what} {} does not exist", path.display()),
            ));
        }
    }
    debug!("Loading TLS material from {} and {}", cert.display(), key.display());

    RustlsConfig::from_pem_file(cert, key).await.map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("cannot load TLS material {}: {e}", cert.display()),
        )
    })
}

/// Serves over HTTPS on `addr` until the process is stopped.
pub async fn serve_tls(state: AppState, addr: &str, tls: RustlsConfig) -> io::Result<()> {
    let addr: SocketAddr = tokio::net::lookup_host(addr).await?.next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("no address for {addr}"))
    })?;
    info!("Serving inventory on https://{addr}");

    axum_server::bind_rustls(addr, tls)
        .serve(router(state).into_make_service_with_connect_info::<SocketAddr>())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_certificate_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("server.crt");
        let key = dir.path().join("server.key");

        let err = tls_config(&cert, &key).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("TLS certificate"), "{err}");
        assert!(err.to_string().contains("server.crt"), "{err}");
    }

    #[tokio::test]
    async fn missing_key_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("server.crt");
        std::fs::write(&cert, "").unwrap();

        let err = tls_config(&cert, &dir.path().join("server.key")).await.unwrap_err();
        assert!(err.to_string().contains("TLS key"), "{err}");
    }

    #[tokio::test]
    async fn unreadable_pem_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("server.crt");
        let key = dir.path().join("server.key");
        std::fs::write(&cert, "not a certificate").unwrap();
        std::fs::write(&key, "not a key").unwrap();

        let err = tls_config(&cert, &key).await.unwrap_err();
        assert!(err.to_string().contains("cannot load TLS material"), "{err}");
    }
}
