//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling lesson requests. It uses
//! `utoipa` doc comments to generate OpenAPI documentation.

use axum::{
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use sozo_core::stepper::LessonStepper;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    models::{
        ErrorResponse, LessonListItem, NextStepPayload, NextStepResponse, StartLessonPayload,
        StartLessonResponse, StatusResponse,
    },
    session::{session_cookie, session_id_from_headers},
    state::AppState,
};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            ApiError::NotFound(error) => (StatusCode::NOT_FOUND, error),
        };
        warn!(%status, %error, "Request rejected");
        (status, Json(ErrorResponse { error })).into_response()
    }
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
}

/// Start a lesson and bind it to a new session.
#[utoipa::path(
    post,
    path = "/api/lesson/start",
    request_body = StartLessonPayload,
    responses(
        (status = 200, description = "Lesson started", body = StartLessonResponse),
        (status = 400, description = "Missing lesson id", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    )
)]
pub async fn start_lesson(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<StartLessonPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let lesson_id = payload
        .lesson_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("lessonId is required".to_string()))?;

    let lesson = state
        .catalog
        .find_by_id(&lesson_id)
        .ok_or_else(|| ApiError::NotFound(format!("Lesson '{}' not found", lesson_id)))?;

    // A new lesson replaces whatever the caller was doing before.
    if let Some(previous) = session_id_from_headers(&headers) {
        state.sessions.remove(previous).await;
    }

    let mut stepper = LessonStepper::new(lesson, state.generator.as_ref());
    let prompt = stepper.start();
    let record = state.sessions.create(stepper.into_state()).await;
    let active_sessions = state.sessions.len().await;

    info!(
        session_id = %record.session_id,
        lesson_id = %lesson_id,
        step_count = lesson.steps.len(),
        active_sessions,
        "Lesson started"
    );

    let body = StartLessonResponse {
        session_id: record.session_id,
        lesson_id,
        is_complete: prompt.is_none(),
        prompt,
    };
    Ok((
        [(header::SET_COOKIE, session_cookie(record.session_id))],
        Json(body),
    ))
}

/// Submit the learner's response to the current step.
#[utoipa::path(
    post,
    path = "/api/lesson/next",
    request_body = NextStepPayload,
    responses(
        (status = 200, description = "Feedback and the next prompt", body = NextStepResponse),
        (status = 400, description = "No active session or missing response", body = ErrorResponse),
        (status = 404, description = "Lesson of the session no longer exists", body = ErrorResponse)
    ),
    params(
        ("x-session-id" = Option<String>, Header, description = "Session id, when the session cookie is not sent")
    )
)]
pub async fn next_step(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<NextStepPayload>, JsonRejection>,
) -> Result<Json<NextStepResponse>, ApiError> {
    let no_session = || ApiError::BadRequest("No active lesson session".to_string());
    let session_id = session_id_from_headers(&headers).ok_or_else(no_session)?;
    let mut record = state.sessions.get(session_id).await.ok_or_else(no_session)?;

    let Json(payload) = payload.map_err(invalid_body)?;
    let learner_response = payload
        .response
        .ok_or_else(|| ApiError::BadRequest("response is required".to_string()))?;

    let lesson_id = record.stepper.lesson_id.clone();
    let lesson = state
        .catalog
        .find_by_id(&lesson_id)
        .ok_or_else(|| ApiError::NotFound(format!("Lesson '{}' not found", lesson_id)))?;

    let mut stepper = LessonStepper::rehydrate(lesson, state.generator.as_ref(), record.stepper);
    let outcome = stepper.advance(learner_response).await;
    record.stepper = stepper.into_state();

    info!(
        %session_id,
        lesson_id = %lesson_id,
        current_step = record.stepper.current_step,
        is_complete = outcome.is_complete,
        "Lesson step processed"
    );
    if !state.sessions.save(record).await {
        warn!(%session_id, "Session ended while the step was processed; progress not stored");
    }

    Ok(Json(outcome.into()))
}

/// Report whether an AI backend and lessons are available.
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Service status", body = StatusResponse)
    )
)]
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ai_backend_available: state.generator.is_ai_backed(),
        lessons_loaded: state.catalog.is_loaded(),
        lesson_count: state.catalog.len(),
    })
}

/// List the available lessons.
#[utoipa::path(
    get,
    path = "/api/lessons",
    responses(
        (status = 200, description = "Lesson summaries", body = [LessonListItem])
    )
)]
pub async fn list_lessons(State(state): State<Arc<AppState>>) -> Json<Vec<LessonListItem>> {
    Json(
        state
            .catalog
            .list_summaries()
            .into_iter()
            .map(LessonListItem::from)
            .collect(),
    )
}
