use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use narcotk_common::config::Config;
use narcotk_common::{Host, Network};
use narcotk_core::{InventoryRepository, SqliteStorage};
use narcotk_web::{AppState, router};
use tower::ServiceExt;

/// Registers through HTTP, then reads the record back from a fresh handle on
/// the same database file.
#[tokio::test]
async fn registered_host_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.db");

    let mut repo = InventoryRepository::new(SqliteStorage::create(&path).unwrap());
    repo.setup().unwrap();
    repo.add_network(&Network::new("10.1.1", "10.1.1.0/24", "rack"))
        .unwrap();

    let config = Config {
        registration_key: Some(String::from("k")),
        ..Config::default()
    };
    let app = router(AppState::new(repo, config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/register?key=k&fqdn=node.example.com&ip=10.1.1.9&nw=10.1.1&s1=node")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let records: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(records[0]["Short1"], "node");

    let mut reader = InventoryRepository::new(SqliteStorage::open(&path).unwrap());
    let hosts: Vec<Host> = narcotk_core::listing::hosts(
        &mut reader,
        &narcotk_core::HostQuery::ByAddress("10.1.1.9".into()),
    )
    .unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].fqdn, "node.example.com");
}
