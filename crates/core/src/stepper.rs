//! Lesson Stepper
//!
//! Walks a learner through a lesson one step per interaction. The stepper is
//! a short-lived value: each request rehydrates it from the persisted
//! [`StepperState`] plus the lesson looked up in the catalog, advances it at
//! most once, and hands the state back to be stored.

use crate::{
    conversation::build_conversation,
    generator::{FeedbackRequest, ResponseGenerator},
    lesson::LessonDefinition,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Feedback returned when `advance` is called past the last step.
pub const INVALID_STEP_RESPONSE: &str = "ステップが無効です。";

/// Prefix of the feedback returned when the generator fails.
pub const GENERATOR_ERROR_PREFIX: &str = "AIレスポンス生成エラーが発生しました";

/// Serializable progress through one lesson.
///
/// `responses` holds one entry per completed step, so its length always
/// equals `current_step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepperState {
    pub lesson_id: String,
    pub current_step: usize,
    pub responses: Vec<String>,
}

impl StepperState {
    pub fn new(lesson_id: impl Into<String>) -> Self {
        Self {
            lesson_id: lesson_id.into(),
            current_step: 0,
            responses: Vec::new(),
        }
    }
}

/// The result of submitting one learner response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub ai_response: String,
    pub next_prompt: Option<String>,
    pub is_complete: bool,
}

pub struct LessonStepper<'a> {
    lesson: &'a LessonDefinition,
    generator: &'a dyn ResponseGenerator,
    state: StepperState,
}

impl<'a> LessonStepper<'a> {
    /// Creates a stepper positioned before the first step of `lesson`.
    pub fn new(lesson: &'a LessonDefinition, generator: &'a dyn ResponseGenerator) -> Self {
        Self::rehydrate(lesson, generator, StepperState::new(lesson.id.clone()))
    }

    /// Restores a stepper from previously persisted state.
    pub fn rehydrate(
        lesson: &'a LessonDefinition,
        generator: &'a dyn ResponseGenerator,
        state: StepperState,
    ) -> Self {
        Self {
            lesson,
            generator,
            state,
        }
    }

    pub fn state(&self) -> &StepperState {
        &self.state
    }

    pub fn into_state(self) -> StepperState {
        self.state
    }

    /// Resets progress and returns the first prompt, or `None` for an empty lesson.
    pub fn start(&mut self) -> Option<String> {
        self.state.current_step = 0;
        self.state.responses.clear();
        self.current_prompt().map(str::to_string)
    }

    /// The prompt for the current step, or `None` once the lesson is complete.
    pub fn current_prompt(&self) -> Option<&str> {
        self.lesson
            .steps
            .get(self.state.current_step)
            .map(|step| step.prompt.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.current_prompt().is_none()
    }

    /// Records the learner's answer, moves to the next step and returns
    /// feedback for the step that was just answered.
    pub async fn advance(&mut self, learner_response: impl Into<String>) -> StepOutcome {
        self.state.responses.push(learner_response.into());
        self.state.current_step += 1;

        let ai_response = self.generate_feedback().await;
        let next_prompt = self.current_prompt().map(str::to_string);
        let is_complete = next_prompt.is_none();

        info!(
            lesson_id = %self.state.lesson_id,
            current_step = self.state.current_step,
            is_complete,
            "Lesson advanced"
        );

        StepOutcome {
            ai_response,
            next_prompt,
            is_complete,
        }
    }

    async fn generate_feedback(&self) -> String {
        let current_step = self.state.current_step;
        let step = current_step
            .checked_sub(1)
            .and_then(|index| self.lesson.steps.get(index));
        let conversation =
            build_conversation(&self.lesson.steps, current_step, &self.state.responses);

        let (Some(step), Some(conversation)) = (step, conversation) else {
            warn!(
                lesson_id = %self.state.lesson_id,
                current_step,
                step_count = self.lesson.steps.len(),
                "Advance requested past the end of the lesson"
            );
            return INVALID_STEP_RESPONSE.to_string();
        };

        let request = FeedbackRequest {
            ai_role: &step.ai_role,
            ai_instructions: &step.ai_instructions,
            learner_response: self
                .state
                .responses
                .last()
                .map(String::as_str)
                .unwrap_or_default(),
            completed_step: current_step - 1,
            conversation,
        };

        match self.generator.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, lesson_id = %self.state.lesson_id, "Response generation failed");
                format!("{GENERATOR_ERROR_PREFIX}: {e}")
            }
        }
    }
}
