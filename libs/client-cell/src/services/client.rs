use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;
use shared_models::client::{validate_client_fields, Client};

use crate::models::{ClientError, ClientSearchQuery, CreateClientRequest, UpdateClientRequest};

pub struct ClientService {
    store: StoreClient,
}

impl ClientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list_clients(&self, query: &ClientSearchQuery) -> Result<Vec<Client>, ClientError> {
        let offset = (query.page() - 1) * query.per_page();
        let mut path = format!(
            "/rest/v1/clients?order=name.asc&limit={}&offset={}",
            query.per_page(),
            offset
        );

        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let term = urlencoding::encode(search);
            path.push_str(&format!(
                "&or=(name.ilike.*{term}*,email.ilike.*{term}*,phone.ilike.*{term}*)"
            ));
        }

        debug!("Listing clients: {}", path);

        self.store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ClientError::Store(e.to_string()))
    }

    pub async fn get_client(&self, client_id: Uuid) -> Result<Client, ClientError> {
        let path = format!("/rest/v1/clients?id=eq.{}", client_id);

        let result: Vec<Client> = self
            .store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ClientError::Store(e.to_string()))?;

        result.into_iter().next().ok_or(ClientError::NotFound)
    }

    pub async fn create_client(&self, request: CreateClientRequest) -> Result<Client, ClientError> {
        debug!("Creating client: {}", request.email);

        let errors = validate_client_fields(&request.name, &request.email, request.phone.as_deref());
        if !errors.is_empty() {
            return Err(ClientError::Validation(errors.join(", ")));
        }

        if self.email_taken(&request.email, None).await? {
            return Err(ClientError::Validation(
                "Email has already been taken".to_string(),
            ));
        }

        let client_data = json!({
            "external_id": Uuid::new_v4().to_string(),
            "name": request.name,
            "email": request.email,
            "phone": request.phone,
            "created_at": Utc::now().to_rfc3339(),
            "updated_at": Utc::now().to_rfc3339()
        });

        let result: Vec<Client> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/clients",
                Some(client_data),
                Some(representation_headers()),
            )
            .await
            .map_err(|e| ClientError::Store(e.to_string()))?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Store("Failed to create client".to_string()))
    }

    pub async fn update_client(
        &self,
        client_id: Uuid,
        request: UpdateClientRequest,
    ) -> Result<Client, ClientError> {
        let current = self.get_client(client_id).await?;

        let name = request.name.as_deref().unwrap_or(&current.name);
        let email = request.email.as_deref().unwrap_or(&current.email);
        let phone = request.phone.as_deref().or(current.phone.as_deref());

        let errors = validate_client_fields(name, email, phone);
        if !errors.is_empty() {
            return Err(ClientError::Validation(errors.join(", ")));
        }

        if email != current.email && self.email_taken(email, Some(client_id)).await? {
            return Err(ClientError::Validation(
                "Email has already been taken".to_string(),
            ));
        }

        let mut update_data = serde_json::Map::new();
        if let Some(name) = request.name {
            update_data.insert("name".to_string(), json!(name));
        }
        if let Some(email) = request.email {
            update_data.insert("email".to_string(), json!(email));
        }
        if let Some(phone) = request.phone {
            update_data.insert("phone".to_string(), json!(phone));
        }
        update_data.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = format!("/rest/v1/clients?id=eq.{}", client_id);

        let result: Vec<Client> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(Value::Object(update_data)),
                Some(representation_headers()),
            )
            .await
            .map_err(|e| ClientError::Store(e.to_string()))?;

        result.into_iter().next().ok_or(ClientError::NotFound)
    }

    /// Deleting a client takes its appointments with it.
    pub async fn delete_client(&self, client_id: Uuid) -> Result<(), ClientError> {
        let appointments_path = format!("/rest/v1/appointments?client_id=eq.{}", client_id);
        let _removed: Vec<Value> = self
            .store
            .request_with_headers(
                Method::DELETE,
                &appointments_path,
                None,
                Some(representation_headers()),
            )
            .await
            .map_err(|e| ClientError::Store(e.to_string()))?;

        let path = format!("/rest/v1/clients?id=eq.{}", client_id);
        let result: Vec<Value> = self
            .store
            .request_with_headers(Method::DELETE, &path, None, Some(representation_headers()))
            .await
            .map_err(|e| ClientError::Store(e.to_string()))?;

        if result.is_empty() {
            return Err(ClientError::NotFound);
        }

        Ok(())
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ClientError> {
        let mut path = format!(
            "/rest/v1/clients?email=eq.{}&select=id",
            urlencoding::encode(email)
        );
        if let Some(id) = exclude {
            path.push_str(&format!("&id=neq.{}", id));
        }

        let existing: Vec<Value> = self
            .store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| ClientError::Store(e.to_string()))?;

        Ok(!existing.is_empty())
    }
}

fn representation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Prefer", HeaderValue::from_static("return=representation"));
    headers
}
