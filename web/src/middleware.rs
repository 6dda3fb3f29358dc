use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

/// Logs peer, method, URI and the resulting status of every request.
pub async fn log_request(req: Request, next: Next) -> Response {
    let peer: String = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| String::from("-"));
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    info!("{peer} {method} {uri} {}", response.status().as_u16());
    response
}
