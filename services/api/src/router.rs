//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the lesson API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        ErrorResponse, LessonListItem, NextStepPayload, NextStepResponse, StartLessonPayload,
        StartLessonResponse, StatusResponse,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::start_lesson,
        handlers::next_step,
        handlers::status,
        handlers::list_lessons,
    ),
    components(
        schemas(StartLessonPayload, StartLessonResponse, NextStepPayload, NextStepResponse, StatusResponse, LessonListItem, ErrorResponse)
    ),
    tags(
        (name = "Sozo API", description = "Step-by-step language lessons with AI feedback")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/api/lesson/start", post(handlers::start_lesson))
        .route("/api/lesson/next", post(handlers::next_step))
        .route("/api/status", get(handlers::status))
        .route("/api/lessons", get(handlers::list_lessons))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
        .layer(TraceLayer::new_for_http())
}
