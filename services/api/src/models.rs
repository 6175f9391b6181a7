//! API Models
//!
//! Request and response bodies of the lesson API, annotated for OpenAPI
//! documentation with `utoipa`.

use serde::{Deserialize, Serialize};
use sozo_core::{lesson::LessonSummary, stepper::StepOutcome};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartLessonPayload {
    #[serde(alias = "lesson_id")]
    #[schema(example = "lesson1")]
    pub lesson_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NextStepPayload {
    #[schema(example = "I'd like a perm, please.")]
    pub response: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartLessonResponse {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    pub lesson_id: String,
    pub prompt: Option<String>,
    pub is_complete: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NextStepResponse {
    pub ai_response: String,
    pub next_prompt: Option<String>,
    pub is_complete: bool,
}

impl From<StepOutcome> for NextStepResponse {
    fn from(outcome: StepOutcome) -> Self {
        Self {
            ai_response: outcome.ai_response,
            next_prompt: outcome.next_prompt,
            is_complete: outcome.is_complete,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub ai_backend_available: bool,
    pub lessons_loaded: bool,
    pub lesson_count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LessonListItem {
    #[schema(example = "lesson1")]
    pub id: String,
    #[schema(example = "Hair salon: greeting a customer")]
    pub title: String,
}

impl From<LessonSummary> for LessonListItem {
    fn from(summary: LessonSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_payload_accepts_both_key_styles() {
        let camel: StartLessonPayload = serde_json::from_str(r#"{"lessonId": "a"}"#).unwrap();
        let snake: StartLessonPayload = serde_json::from_str(r#"{"lesson_id": "b"}"#).unwrap();

        assert_eq!(camel.lesson_id.as_deref(), Some("a"));
        assert_eq!(snake.lesson_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_payload_missing_fields_deserialize_as_none() {
        let start: StartLessonPayload = serde_json::from_str("{}").unwrap();
        let next: NextStepPayload = serde_json::from_str("{}").unwrap();

        assert!(start.lesson_id.is_none());
        assert!(next.response.is_none());
    }

    #[test]
    fn test_start_response_serialization() {
        let response = StartLessonResponse {
            session_id: Uuid::nil(),
            lesson_id: "lesson1".to_string(),
            prompt: None,
            is_complete: true,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sessionId": "00000000-0000-0000-0000-000000000000",
                "lessonId": "lesson1",
                "prompt": null,
                "isComplete": true
            })
        );
    }

    #[test]
    fn test_next_step_response_from_outcome() {
        let response: NextStepResponse = StepOutcome {
            ai_response: "Good!".to_string(),
            next_prompt: Some("Bye".to_string()),
            is_complete: false,
        }
        .into();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"aiResponse": "Good!", "nextPrompt": "Bye", "isComplete": false})
        );
    }

    #[test]
    fn test_status_response_serialization() {
        let status = StatusResponse {
            ai_backend_available: false,
            lessons_loaded: true,
            lesson_count: 2,
        };

        let expected = r#"{"aiBackendAvailable":false,"lessonsLoaded":true,"lessonCount":2}"#;
        assert_eq!(serde_json::to_string(&status).unwrap(), expected);
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            error: "Lesson not found".to_string(),
        };

        let expected = r#"{"error":"Lesson not found"}"#;
        assert_eq!(serde_json::to_string(&error).unwrap(), expected);
    }
}
