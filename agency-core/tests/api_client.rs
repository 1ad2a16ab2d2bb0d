use agency_core::api::{UploadDocumentForm, CLIENTS_ENDPOINT};
use agency_core::config::ApiConfig;
use agency_core::models::{Client, Lead};
use agency_core::table::entity_table::LOAD_ERROR_MESSAGE;
use agency_core::{
    AdminApiClient, ApiError, Definitions, Entity, LookupKind, PageController, SourceKind, TableAction,
    TableView,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_bare_list_with_numeric_ids() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/clients/",
        json!([
            {"id": 1, "name": "Priya Nair", "email": "priya@example.com", "client_type": 2},
            {"id": 2, "name": "Omar Haddad", "service_of_interest": 1}
        ]),
    )
    .await;

    let api = AdminApiClient::with_base_url(&server.uri());
    let clients = api.list_clients().await.unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].id, "1");
    assert_eq!(clients[1].email, None);
}

#[tokio::test]
async fn test_results_envelope_is_unwrapped() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/leads/",
        json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id": "L-1", "name": "Grace Kim", "source": "Website", "status": "New"},
                {"id": "L-2", "name": "Ivan Petrov", "source": "Referral", "status": "Qualified"}
            ]
        }),
    )
    .await;

    let api = AdminApiClient::with_base_url(&server.uri());
    let leads: Vec<Lead> = api.list_leads().await.unwrap();
    let names: Vec<&str> = leads.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Grace Kim", "Ivan Petrov"]);
}

#[tokio::test]
async fn test_definitions_load_every_table_once() {
    let server = MockServer::start().await;
    for kind in LookupKind::ALL {
        Mock::given(method("GET"))
            .and(path(kind.endpoint()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "term": format!("{} one", kind.as_str())},
                {"id": 2, "term": format!("{} two", kind.as_str())}
            ])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let api = AdminApiClient::with_base_url(&server.uri());
    let defs = Definitions::load(&api).await.unwrap();

    for kind in LookupKind::ALL {
        assert!(defs.is_loaded(kind));
    }
    assert_eq!(defs.label(LookupKind::ClientTypes, Some(2)), "client-types two");
    assert_eq!(defs.options(LookupKind::DocumentTypes).len(), 2);
}

#[tokio::test]
async fn test_server_error_shows_error_state_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CLIENTS_ENDPOINT))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let api = AdminApiClient::with_base_url(&server.uri());
    let source = Client::source(&api).unwrap();
    let mut controller = PageController::<Client>::new(source, 10).unwrap();
    assert_eq!(controller.source_kind(), SourceKind::Remote);

    for _ in 0..3 {
        controller.update().await;
    }
    controller.dispatch(TableAction::SetSearch("priya".to_string()));
    controller.run_pending().await;

    assert_eq!(controller.table().view(), TableView::Error(LOAD_ERROR_MESSAGE.to_string()));
    assert_eq!(controller.table().row_count(), 0);
}

#[tokio::test]
async fn test_reload_fetches_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CLIENTS_ENDPOINT))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"detail": "Service temporarily unavailable"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let api = AdminApiClient::with_base_url(&server.uri());
    let mut controller = PageController::<Client>::new(Client::source(&api).unwrap(), 10).unwrap();
    controller.update().await;
    assert_eq!(
        controller.table().view(),
        TableView::Error("Service temporarily unavailable".to_string())
    );

    controller.dispatch(TableAction::Reload);
    controller.run_pending().await;
}

#[tokio::test]
async fn test_status_error_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/marketplace/products/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Not allowed"})))
        .mount(&server)
        .await;

    let api = AdminApiClient::with_base_url(&server.uri());
    let err = api.list_marketplace_products().await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message.as_deref(), Some("Not allowed"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/definitions/user-types/"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "term": "Admin"}])))
        .expect(1)
        .mount(&server)
        .await;

    let api = AdminApiClient::new(&ApiConfig {
        base_url: format!("{}/", server.uri()),
        token: Some("s3cret".to_string()),
        ..ApiConfig::default()
    });
    let types = api.user_types().await.unwrap();
    assert_eq!(types[0].term, "Admin");
}

#[tokio::test]
async fn test_upload_sends_multipart_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/documents/upload/"))
        .and(body_string_contains("name=\"client\""))
        .and(body_string_contains("name=\"document_type\""))
        .and(body_string_contains("filename=\"passport.pdf\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 31, "message": "Uploaded"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = UploadDocumentForm::new();
    form.set_client("7");
    form.set_document_type(Some(2));
    form.set_file("passport.pdf", b"%PDF-1.7 fake".to_vec());

    let api = AdminApiClient::with_base_url(&server.uri());
    let response = api.upload_document(&form).await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Uploaded"));
}

#[tokio::test]
async fn test_incomplete_upload_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = UploadDocumentForm::new();
    form.set_document_type(Some(2));
    form.set_file("passport.pdf", vec![1, 2, 3]);
    assert!(!form.can_upload());

    let api = AdminApiClient::with_base_url(&server.uri());
    let err = api.upload_document(&form).await.unwrap_err();
    assert!(matches!(err, ApiError::IncompleteForm(_)));
}
