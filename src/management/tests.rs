//! Tests for the management endpoints

use super::*;
use crate::http::{HttpRequest, HttpResponse, MockResponse, TransportError};
use crate::options::{CheckpointPaginatedRequest, FilteredRequest, PaginatedRequest};
use crate::pagination::PaginationMode;
use crate::types::Method;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;

struct OfflineTransport;

#[async_trait]
impl Transport for OfflineTransport {
    async fn send(&self, _request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        Err(TransportError::new("offline"))
    }
}

fn management() -> Management {
    let config = ClientConfig::builder("tenant.example.com")
        .telemetry(false)
        .build();
    Management::with_transport(&config, Arc::new(OfflineTransport)).unwrap()
}

fn expect_request(
    api: &Management,
    method: Method,
    url_suffix: &'static str,
    body: Option<serde_json::Value>,
) {
    api.client().mock_response(
        MockResponse::new(HttpResponse::json(200, &json!({}))).with_callback(
            move |request, _| {
                assert_eq!(request.method, method);
                assert!(
                    request.url.ends_with(url_suffix),
                    "{} does not end with {url_suffix}",
                    request.url
                );
                if let Some(expected) = &body {
                    let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                    assert_eq!(&sent, expected);
                }
            },
        ),
    );
}

#[test]
fn test_require() {
    assert_eq!(require("id", " u1 ").unwrap(), "u1");
    assert!(matches!(
        require("id", "  "),
        Err(Error::InvalidArgument { ref name, .. }) if name == "id"
    ));
}

#[tokio::test]
async fn test_users_get_all_with_filters() {
    let api = management();
    expect_request(
        &api,
        Method::GET,
        "/api/v2/users?q=email%3Ajane%40example.com&fields=user_id%2Cemail&include_fields=true&page=0&per_page=50&include_totals=true",
        None,
    );

    let params = json!({"q": "email:jane@example.com", "sort": null});
    let options = RequestOptions::new()
        .with_fields(FilteredRequest::new(["user_id", "email"]).include_fields(true))
        .with_pagination(PaginatedRequest::new(0, 50));

    api.users()
        .get_all(params.as_object(), Some(&options))
        .await
        .unwrap();
    assert!(api.client().mocks().is_empty());
}

#[tokio::test]
async fn test_users_crud() {
    let api = management();

    expect_request(&api, Method::GET, "/api/v2/users/u1", None);
    api.users().get("u1").await.unwrap();

    expect_request(
        &api,
        Method::POST,
        "/api/v2/users",
        Some(json!({"email": "a@example.com", "connection": "db"})),
    );
    api.users()
        .create("db", json!({"email": "a@example.com"}))
        .await
        .unwrap();

    expect_request(
        &api,
        Method::PATCH,
        "/api/v2/users/u1",
        Some(json!({"blocked": true})),
    );
    api.users().update("u1", json!({"blocked": true})).await.unwrap();

    expect_request(&api, Method::DELETE, "/api/v2/users/u1", None);
    api.users().delete("u1").await.unwrap();

    assert!(api.client().mocks().is_empty());
}

#[tokio::test]
async fn test_users_argument_validation() {
    let api = management();

    assert!(matches!(
        api.users().get("").await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        api.users().create("", json!({})).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        api.users().create("db", json!(["not", "an", "object"])).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        api.users().update("u1", json!("nope")).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        api.organizations().add_members("org_1", &[]).await,
        Err(Error::InvalidArgument { .. })
    ));
}

#[tokio::test]
async fn test_organization_members() {
    let api = management();

    expect_request(
        &api,
        Method::POST,
        "/api/v2/organizations/org_1/members",
        Some(json!({"members": ["u1", "u2"]})),
    );
    api.organizations()
        .add_members("org_1", &["u1".to_string(), "u2".to_string()])
        .await
        .unwrap();

    expect_request(
        &api,
        Method::GET,
        "/api/v2/organizations/org_1/members?take=10",
        None,
    );
    api.organizations()
        .get_members(
            "org_1",
            Some(&RequestOptions::new().with_checkpoint(CheckpointPaginatedRequest::new(10))),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logs_paginate_by_checkpoint() {
    let api = management();
    api.client().mock_responses(vec![
        HttpResponse::json(200, &json!({"next": "l2", "logs": [{"log_id": "1"}, {"log_id": "2"}]})),
        HttpResponse::json(200, &json!({"next": "l3", "logs": [{"log_id": "3"}]})),
        HttpResponse::json(200, &json!({"logs": []})),
    ]);

    let options = RequestOptions::new().with_checkpoint(CheckpointPaginatedRequest::new(2));
    api.logs().get_all(None, Some(&options)).await.unwrap();

    let mut paginator = api.paginator().unwrap();
    assert_eq!(paginator.mode(), PaginationMode::Checkpoint);

    let ids: Vec<_> = paginator
        .collect_all()
        .await
        .into_iter()
        .map(|log| log["log_id"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(paginator.count_network_requests(), 2);
}

#[tokio::test]
async fn test_roles_users_and_user_logs_are_checkpoint_capable() {
    let api = management();
    let options = RequestOptions::new().with_checkpoint(CheckpointPaginatedRequest::new(5));

    api.client()
        .mock_response(HttpResponse::json(200, &json!({"users": [{"user_id": "u1"}]})));
    api.roles().get_users("rol_1", Some(&options)).await.unwrap();
    assert_eq!(api.paginator().unwrap().mode(), PaginationMode::Checkpoint);

    api.client()
        .mock_response(HttpResponse::json(200, &json!({"logs": []})));
    api.users().get_logs("u1", Some(&options)).await.unwrap();
    assert_eq!(api.paginator().unwrap().mode(), PaginationMode::Checkpoint);
}

#[tokio::test]
async fn test_roles_get_all_offset() {
    let api = management();
    api.client().mock_response(HttpResponse::json(
        200,
        &json!({"start": 0, "limit": 50, "total": 1, "roles": [{"id": "rol_1"}]}),
    ));

    let options = RequestOptions::new().with_pagination(PaginatedRequest::new(0, 50));
    api.roles().get_all(None, Some(&options)).await.unwrap();

    let paginator = api.paginator().unwrap();
    assert_eq!(paginator.mode(), PaginationMode::Offset);
    assert_eq!(paginator.count().unwrap(), 1);
}

#[tokio::test]
async fn test_paginator_after_write_is_rejected() {
    let api = management();
    api.client().mock_response(HttpResponse::json(200, &json!({})));
    api.users().delete("u1").await.unwrap();

    assert!(matches!(
        api.paginator(),
        Err(Error::PaginatorUnsupportedMethod { .. })
    ));
}
