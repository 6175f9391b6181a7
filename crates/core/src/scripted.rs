//! Scripted fallback responses for running without an AI backend.
//!
//! The trigger phrases belong to the bundled hair-salon demo lesson. Rules
//! are checked in order and the first match wins.

use crate::generator::{FeedbackRequest, GeneratorError, ResponseGenerator};
use async_trait::async_trait;

pub const STAFF_ROLE_CHOSEN: &str =
    "スタッフ役を選択しました。では、お客様の発言に応答してみましょう。";
pub const CUSTOMER_ROLE_CHOSEN: &str =
    "お客様役を選択しました。では、スタッフの発言に応答してみましょう。";
pub const TREATMENT_CORRECT: &str = "正解です！「treatment」が「トリートメント」の英語表現です。";
pub const DAMAGE_CORRECT: &str = "正解です！「damage」が「ダメージ」の英語表現です。";
pub const PERM_CORRECT: &str = "正解です！「perm」の日本語は「パーマ」です。";
pub const IF_YOU_FEEL_PRAISE: &str =
    "良い文章です！「If you feel like...」の表現を上手に使えています。";

/// Deterministic keyword-matching generator with no network dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedResponder;

impl ScriptedResponder {
    pub fn new() -> Self {
        Self
    }

    /// Picks the canned reply for a learner answer to step `completed_step`.
    pub fn respond(&self, learner_response: &str, completed_step: usize) -> &'static str {
        let lower = learner_response.to_lowercase();

        if learner_response.contains('1') || learner_response.contains("スタッフ") {
            return STAFF_ROLE_CHOSEN;
        }
        if learner_response.contains('2')
            || learner_response.contains("客")
            || learner_response.contains("お客")
        {
            return CUSTOMER_ROLE_CHOSEN;
        }
        // The exact "2" and "3" checks below are shadowed by earlier rules.
        if lower.contains("treatment") || learner_response == "2" {
            return TREATMENT_CORRECT;
        }
        if lower.contains("damage") || learner_response == "3" {
            return DAMAGE_CORRECT;
        }
        if learner_response.contains("パーマ") || learner_response == "3" {
            return PERM_CORRECT;
        }
        if lower.contains("if you feel") {
            return IF_YOU_FEEL_PRAISE;
        }

        match completed_step {
            0 => "次のステップに進みましょう！",
            1 => "役割を選んでいただきありがとうございます。",
            2 => "英語での応答、よく頑張りました！次に進みましょう。",
            _ => "ご回答ありがとうございます。次に進みましょう。",
        }
    }
}

#[async_trait]
impl ResponseGenerator for ScriptedResponder {
    async fn generate(&self, request: &FeedbackRequest<'_>) -> Result<String, GeneratorError> {
        tracing::debug!(
            role = request.ai_role,
            learner_response = request.learner_response,
            "Generating scripted response"
        );
        Ok(self
            .respond(request.learner_response, request.completed_step)
            .to_string())
    }

    fn is_ai_backed(&self) -> bool {
        false
    }
}
