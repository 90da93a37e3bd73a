use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    admin::{create_match, create_referee, deactivate_referee, put_tariff, update_match_status},
    assignments::{complete_assignment, create_assignment, delete_match, respond_assignment},
    availability::put_availability,
    settlements::{get_referee_settlement, get_settlement},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/referees", post(create_referee))
        .route("/api/referees/:id", delete(deactivate_referee))
        .route("/api/matches", post(create_match))
        .route("/api/matches/:id/status", put(update_match_status))
        .route("/api/tariffs", put(put_tariff))
        .route("/api/assignments", post(create_assignment))
        .route("/api/assignments/:id/respond", post(respond_assignment))
        .route("/api/assignments/:id/complete", post(complete_assignment))
        .route("/api/matches/:id", delete(delete_match))
        .route("/api/referees/:id/availability", put(put_availability))
        .route("/api/settlements", get(get_settlement))
        .route("/api/settlements/referee/:id", get(get_referee_settlement))
        .with_state(state)
}
