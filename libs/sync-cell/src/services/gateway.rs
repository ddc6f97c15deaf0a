use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::GatewayResponse;

/// Typed client over the external system of record. Holds no mutable
/// state beyond the endpoint and the bearer credential, and never lets a
/// transport error escape: every exchange is normalized into a
/// `GatewayResponse` at this boundary.
pub struct ExternalApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ExternalApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.external_api_base_url.clone(),
            api_key: config.external_api_key.clone(),
        }
    }

    pub async fn fetch_clients(&self) -> GatewayResponse {
        self.execute(Method::GET, "/clients", None).await
    }

    pub async fn fetch_appointments(&self) -> GatewayResponse {
        self.execute(Method::GET, "/appointments", None).await
    }

    pub async fn create_appointment(&self, appointment_data: Value) -> GatewayResponse {
        self.execute(Method::POST, "/appointments", Some(appointment_data))
            .await
    }

    pub async fn update_appointment(
        &self,
        appointment_id: &str,
        appointment_data: Value,
    ) -> GatewayResponse {
        let path = format!("/appointments/{}", appointment_id);
        self.execute(Method::PUT, &path, Some(appointment_data)).await
    }

    pub async fn delete_appointment(&self, appointment_id: &str) -> GatewayResponse {
        let path = format!("/appointments/{}", appointment_id);
        self.execute(Method::DELETE, &path, None).await
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> GatewayResponse {
        let url = format!("{}{}", self.base_url, path);
        debug!("External API request: {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json");

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        match self.dispatch(req).await {
            Ok(response) => response,
            Err(e) => {
                error!("External API network error: {}", e);
                GatewayResponse::failure(format!("Network error: {}", e), None)
            }
        }
    }

    async fn dispatch(&self, req: RequestBuilder) -> Result<GatewayResponse, reqwest::Error> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(handle_response(status, body))
    }
}

/// Classification rule for a completed HTTP exchange. Client-range
/// failures keep the body for diagnostics; server-range failures discard
/// it.
fn handle_response(status: StatusCode, body: String) -> GatewayResponse {
    let data = parse_body(body);

    match status.as_u16() {
        200..=299 => GatewayResponse::ok(data),
        400..=499 => {
            let message = format!("Client error: {}", reason(status));
            GatewayResponse::failure(message, data)
        }
        500..=599 => {
            let message = format!("Server error: {}", reason(status));
            GatewayResponse::failure(message, None)
        }
        code => GatewayResponse::failure(format!("Unknown error: {}", code), None),
    }
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(|r| r.to_string())
        .unwrap_or_else(|| status.as_u16().to_string())
}

fn parse_body(body: String) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_str(&body)
        .ok()
        .or(Some(Value::String(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_success_range() {
        let response = handle_response(StatusCode::OK, "[]".to_string());
        assert!(response.success);
        assert_eq!(response.data, Some(serde_json::json!([])));
    }

    #[test]
    fn client_errors_keep_the_body() {
        let response = handle_response(StatusCode::NOT_FOUND, "{\"detail\":\"gone\"}".to_string());
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Client error: Not Found"));
        assert!(response.data.is_some());
    }

    #[test]
    fn server_errors_discard_the_body() {
        let response =
            handle_response(StatusCode::INTERNAL_SERVER_ERROR, "stack trace".to_string());
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("Server error: Internal Server Error")
        );
        assert!(response.data.is_none());
    }

    #[test]
    fn out_of_range_statuses_are_unknown() {
        let status = StatusCode::from_u16(600).unwrap();
        let response = handle_response(status, String::new());
        assert_eq!(response.error.as_deref(), Some("Unknown error: 600"));
    }

    #[test]
    fn non_json_success_body_is_kept_raw() {
        let response = handle_response(StatusCode::OK, "plain text".to_string());
        assert!(response.success);
        assert_eq!(response.data, Some(Value::String("plain text".to_string())));
    }
}
