use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

pub fn client_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients", post(create_client))
        .route("/clients/{id}", get(get_client))
        .route("/clients/{id}", put(update_client))
        .route("/clients/{id}", delete(delete_client))
        .with_state(config)
}
