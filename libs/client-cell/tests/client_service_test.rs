use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use client_cell::models::{ClientError, ClientSearchQuery, CreateClientRequest};
use client_cell::services::ClientService;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

async fn service_for(store: &MockServer) -> ClientService {
    let config = TestConfig::with_servers(&store.uri(), "http://localhost:4010").to_app_config();
    ClientService::new(&config)
}

#[tokio::test]
async fn create_client_assigns_an_external_id_and_persists() {
    let store = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/clients"))
        .and(query_param("email", "eq.jane@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/clients"))
        .and(body_partial_json(json!({
            "name": "Jane Doe",
            "email": "jane@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::client_row(Uuid::new_v4(), "ext-1", "Jane Doe", "jane@example.com")
        ])))
        .expect(1)
        .mount(&store)
        .await;

    let client = service_for(&store)
        .await
        .create_client(CreateClientRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
        })
        .await
        .expect("client should be created");

    assert_eq!(client.name, "Jane Doe");
    assert_eq!(client.external_id, "ext-1");
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_a_write() {
    let store = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/clients"))
        .and(query_param("email", "eq.jane@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": Uuid::new_v4().to_string() }])),
        )
        .mount(&store)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/clients"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&store)
        .await;

    let result = service_for(&store)
        .await
        .create_client(CreateClientRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
        })
        .await;

    match result {
        Err(ClientError::Validation(msg)) => {
            assert_eq!(msg, "Email has already been taken");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn blank_fields_are_reported_together_before_any_store_call() {
    // No mocks mounted: a store call would 404 and fail the upsert path.
    let store = MockServer::start().await;

    let result = service_for(&store)
        .await
        .create_client(CreateClientRequest {
            name: String::new(),
            email: String::new(),
            phone: None,
        })
        .await;

    match result {
        Err(ClientError::Validation(msg)) => {
            assert_eq!(
                msg,
                "Name can't be blank, Email can't be blank, Email is invalid"
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_client_is_a_distinct_not_found() {
    let store = MockServer::start().await;
    let client_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/clients"))
        .and(query_param("id", format!("eq.{}", client_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&store)
        .await;

    let result = service_for(&store).await.get_client(client_id).await;

    assert!(matches!(result, Err(ClientError::NotFound)));
}

#[tokio::test]
async fn search_terms_are_applied_to_the_listing() {
    let store = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/clients"))
        .and(query_param(
            "or",
            "(name.ilike.*jane*,email.ilike.*jane*,phone.ilike.*jane*)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::client_row(Uuid::new_v4(), "ext-1", "Jane Doe", "jane@example.com")
        ])))
        .expect(1)
        .mount(&store)
        .await;

    let clients = service_for(&store)
        .await
        .list_clients(&ClientSearchQuery {
            search: Some("jane".to_string()),
            page: None,
            per_page: None,
        })
        .await
        .expect("listing should succeed");

    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Jane Doe");
}

#[tokio::test]
async fn deleting_a_client_takes_its_appointments_first() {
    let store = MockServer::start().await;
    let client_id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("client_id", format!("eq.{}", client_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&store)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/clients"))
        .and(query_param("id", format!("eq.{}", client_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::client_row(client_id, "ext-1", "Jane Doe", "jane@example.com")
        ])))
        .expect(1)
        .mount(&store)
        .await;

    service_for(&store)
        .await
        .delete_client(client_id)
        .await
        .expect("delete should succeed");
}
