use anyhow::Context;
use narcotk_common::config::Config;
use narcotk_web::AppState;

use crate::commands::open_repository;

pub async fn serve(
    mut cfg: Config,
    listen_ip: Option<String>,
    listen_port: Option<u16>,
    tls: bool,
) -> anyhow::Result<()> {
    if let Some(ip) = listen_ip {
        cfg.listen_ip = ip;
    }
    if let Some(port) = listen_port {
        cfg.listen_port = port;
    }
    cfg.enable_tls |= tls;

    let addr: String = cfg.listen_addr();
    let repo = open_repository(&cfg)?;

    if !cfg.enable_tls {
        return narcotk_web::serve(AppState::new(repo, cfg), &addr)
            .await
            .with_context(|| format!("cannot serve on {addr}"));
    }

    let tls = narcotk_web::tls_config(&cfg.tls_cert, &cfg.tls_key).await?;
    narcotk_web::serve_tls(AppState::new(repo, cfg), &addr, tls)
        .await
        .with_context(|| format!("cannot serve HTTPS on {addr}"))
}
