use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

pub fn appointment_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/appointments", get(list_appointments))
        .route("/appointments/{id}", get(get_appointment))
        .route("/appointments/{id}", put(update_appointment))
        .route("/appointments/{id}", delete(cancel_appointment))
        .route("/clients/{id}/appointments", post(create_appointment))
        .with_state(config)
}
