use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use narcotk_common::models::present;
use narcotk_common::{Host, Network, render};
use narcotk_core::listing::{self, HostQuery, NetworkQuery};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// `json=y`, `header=y`, `mac=y` and, on `/host/{host}`, `file=ext`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingFlags {
    json: Option<String>,
    header: Option<String>,
    mac: Option<String>,
    file: Option<String>,
}

impl ListingFlags {
    fn json(&self) -> bool {
        is_yes(&self.json)
    }

    /// Header text is never mixed into JSON.
    fn header(&self) -> bool {
        is_yes(&self.header) && !self.json()
    }

    fn mac(&self) -> bool {
        is_yes(&self.mac)
    }
}

fn is_yes(flag: &Option<String>) -> bool {
    flag.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("y"))
}

#[derive(Debug, Default, Deserialize)]
pub struct Registration {
    key: Option<String>,
    fqdn: Option<String>,
    ip: Option<String>,
    nw: Option<String>,
    ipv6: Option<String>,
    mac: Option<String>,
    s1: Option<String>,
    s2: Option<String>,
    s3: Option<String>,
    s4: Option<String>,
}

pub async fn hosts(
    State(state): State<AppState>,
    Query(flags): Query<ListingFlags>,
) -> Result<Response, ApiError> {
    host_listing(&state, HostQuery::All, &flags).await
}

pub async fn hosts_in_network(
    State(state): State<AppState>,
    Path(network): Path<String>,
    Query(flags): Query<ListingFlags>,
) -> Result<Response, ApiError> {
    host_listing(&state, HostQuery::InNetwork(network), &flags).await
}

pub async fn host(
    State(state): State<AppState>,
    Path(host): Path<String>,
    Query(flags): Query<ListingFlags>,
) -> Result<Response, ApiError> {
    match &flags.file {
        Some(ext) => host_file(&state, &host, ext).await,
        None => host_listing(&state, HostQuery::ByName(host), &flags).await,
    }
}

pub async fn hosts_by_address(
    State(state): State<AppState>,
    Path(ip): Path<String>,
    Query(flags): Query<ListingFlags>,
) -> Result<Response, ApiError> {
    host_listing(&state, HostQuery::ByAddress(ip), &flags).await
}

pub async fn hosts_by_mac(
    State(state): State<AppState>,
    Path(mac): Path<String>,
    Query(flags): Query<ListingFlags>,
) -> Result<Response, ApiError> {
    host_listing(&state, HostQuery::ByMac(mac), &flags).await
}

pub async fn networks(
    State(state): State<AppState>,
    Query(flags): Query<ListingFlags>,
) -> Result<Response, ApiError> {
    network_listing(&state, NetworkQuery::All, &flags).await
}

pub async fn network(
    State(state): State<AppState>,
    Path(network): Path<String>,
    Query(flags): Query<ListingFlags>,
) -> Result<Response, ApiError> {
    network_listing(&state, NetworkQuery::ById(network), &flags).await
}

pub async fn index(State(state): State<AppState>) -> Result<Response, ApiError> {
    let Some(path) = &state.config().index_file else {
        return Err(ApiError::NoMatch);
    };
    let text: String = tokio::fs::read_to_string(path).await.map_err(|e| {
        ApiError::Internal(format!("cannot read index file {}: {e}", path.display()))
    })?;
    Ok(Html(text).into_response())
}

/// Adds a host on behalf of the machine calling in.
pub async fn register(
    State(state): State<AppState>,
    Query(params): Query<Registration>,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config().registration_key.as_deref() else {
        return Err(ApiError::NoMatch);
    };
    if params.key.as_deref() != Some(expected) {
        warn!("Registration with an invalid key for {:?}", params.fqdn);
        return Err(ApiError::Unauthorized);
    }

    let (Some(fqdn), Some(ipv4), Some(network)) =
        (present(params.fqdn), present(params.ip), present(params.nw))
    else {
        return Err(ApiError::BadRequest(String::from(
            "fqdn, ip and nw are required",
        )));
    };

    let host = Host {
        padded_ip: String::new(),
        network,
        ipv4,
        ipv6: params.ipv6.unwrap_or_default(),
        fqdn,
        short1: params.s1.unwrap_or_default(),
        short2: params.s2.unwrap_or_default(),
        short3: params.s3.unwrap_or_default(),
        short4: params.s4.unwrap_or_default(),
        mac: params.mac.unwrap_or_default(),
    };
    let stored: Host = state.run(move |repo| repo.add_host(&host)).await?;

    Ok((StatusCode::CREATED, json_body(render::json(std::slice::from_ref(&stored))?)).into_response())
}

async fn host_listing(
    state: &AppState,
    query: HostQuery,
    flags: &ListingFlags,
) -> Result<Response, ApiError> {
    debug!("Host listing {query:?}");
    let hosts: Vec<Host> = state
        .run(move |repo| listing::hosts(repo, &query))
        .await?;
    if hosts.is_empty() {
        return Err(ApiError::NoMatch);
    }

    if flags.json() {
        return Ok(json_body(render::json(&hosts)?).into_response());
    }

    let mut body: String = header_text(state, flags).await;
    body.push_str(&render::hosts_table(&hosts, flags.mac()));
    Ok(body.into_response())
}

async fn network_listing(
    state: &AppState,
    query: NetworkQuery,
    flags: &ListingFlags,
) -> Result<Response, ApiError> {
    debug!("Network listing {query:?}");
    let networks: Vec<Network> = state
        .run(move |repo| listing::networks(repo, &query))
        .await?;
    if networks.is_empty() {
        return Err(ApiError::NoMatch);
    }

    if flags.json() {
        return Ok(json_body(render::json(&networks)?).into_response());
    }

    let mut body: String = header_text(state, flags).await;
    body.push_str(&render::networks_table(&networks));
    Ok(body.into_response())
}

/// Serves `<Files>/<host>.<ext>`.
async fn host_file(state: &AppState, host: &str, ext: &str) -> Result<Response, ApiError> {
    if ext.is_empty() {
        return Err(ApiError::NoMatch);
    }
    if !is_plain_name(host) || !is_plain_name(ext) {
        return Err(ApiError::BadRequest(format!(
            "invalid file name {host}.{ext}"
        )));
    }

    let path = state.config().files.join(format!("{host}.{ext}"));
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "application/octet-stream")], bytes).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No host file {}", path.display());
            Err(ApiError::NoMatch)
        }
        Err(e) => Err(ApiError::Internal(format!(
            "cannot read {}: {e}",
            path.display()
        ))),
    }
}

/// Rejects anything that could leave the files directory.
fn is_plain_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && !name.contains("..")
}

async fn header_text(state: &AppState, flags: &ListingFlags) -> String {
    if !flags.header() {
        return String::new();
    }
    let path = &state.config().header_file;
    match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Cannot read header file {}: {e}", path.display());
            String::new()
        }
    }
}

fn json_body(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], body)
}
