use serde::{Deserialize, Serialize};

/// Role the AI takes when a step does not name one.
pub const DEFAULT_AI_ROLE: &str = "教師";

fn default_ai_role() -> String {
    DEFAULT_AI_ROLE.to_string()
}

/// A single exchange in a lesson script.
///
/// The `ai_role` and `ai_instructions` fields steer the response generator
/// when it grades the learner's answer to `prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_ai_role")]
    pub ai_role: String,
    #[serde(default)]
    pub ai_instructions: String,
}

impl StepDefinition {
    /// Creates a step with the given prompt, role and instructions.
    pub fn new(
        prompt: impl Into<String>,
        ai_role: impl Into<String>,
        ai_instructions: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            ai_role: ai_role.into(),
            ai_instructions: ai_instructions.into(),
        }
    }
}

/// An ordered lesson script as stored in the lesson document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDefinition {
    #[serde(rename = "lesson_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

impl LessonDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>, steps: Vec<StepDefinition>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            steps,
        }
    }

    /// The title shown in lesson lists, falling back to `Lesson <id>`.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("Lesson {}", self.id),
        }
    }

    pub fn summary(&self) -> LessonSummary {
        LessonSummary {
            id: self.id.clone(),
            title: self.display_title(),
        }
    }
}

/// The `{id, title}` pair used to list lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: String,
    pub title: String,
}
