//! Conversation context sent to the response generator.

use crate::lesson::StepDefinition;

/// One message in a conversation, tagged with the speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    System(String),
    Assistant(String),
    User(String),
}

/// The ordered messages handed to a text-completion backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversation {
    pub turns: Vec<Turn>,
}

impl Conversation {
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Builds the system instruction for a step's persona.
pub fn system_instruction(ai_role: &str, ai_instructions: &str) -> String {
    format!("あなたは英語学習アシスタントの{ai_role}です。{ai_instructions}")
}

/// Builds the context for grading the step that was just completed.
///
/// `current_step` is the 1-based, already-incremented step counter and
/// `responses` holds every learner answer so far (the last one being the
/// answer to step `current_step - 1`). Returns `None` when `current_step`
/// does not name a step of `steps`.
///
/// When a previous answer exists, the previous step's prompt and the
/// learner's answer to it are inserted ahead of the latest answer. Only one
/// turn of lookback is carried.
pub fn build_conversation(
    steps: &[StepDefinition],
    current_step: usize,
    responses: &[String],
) -> Option<Conversation> {
    if current_step == 0 || current_step > steps.len() {
        return None;
    }
    let step = &steps[current_step - 1];
    let latest = responses.last()?;

    let mut turns = vec![Turn::System(system_instruction(
        &step.ai_role,
        &step.ai_instructions,
    ))];

    if current_step > 1 && responses.len() >= 2 {
        let previous_step = &steps[current_step - 2];
        turns.push(Turn::Assistant(previous_step.prompt.clone()));
        turns.push(Turn::User(responses[responses.len() - 2].clone()));
    }

    turns.push(Turn::User(latest.clone()));
    Some(Conversation { turns })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps() -> Vec<StepDefinition> {
        vec![
            StepDefinition::new("Choose a role", "guide", "Help them pick."),
            StepDefinition::new("Say hello", "customer", "Reply as a customer."),
            StepDefinition::new("Say goodbye", "customer", ""),
        ]
    }

    fn answers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_step_has_no_lookback() {
        let conversation = build_conversation(&steps(), 1, &answers(&["staff"])).unwrap();

        assert_eq!(
            conversation.turns,
            vec![
                Turn::System("あなたは英語学習アシスタントのguideです。Help them pick.".into()),
                Turn::User("staff".into()),
            ]
        );
    }

    #[test]
    fn second_step_includes_one_turn_of_lookback() {
        let conversation =
            build_conversation(&steps(), 2, &answers(&["staff", "Hello!"])).unwrap();

        assert_eq!(
            conversation.turns,
            vec![
                Turn::System("あなたは英語学習アシスタントのcustomerです。Reply as a customer.".into()),
                Turn::Assistant("Choose a role".into()),
                Turn::User("staff".into()),
                Turn::User("Hello!".into()),
            ]
        );
    }

    #[test]
    fn lookback_never_reaches_further_than_one_turn() {
        let conversation =
            build_conversation(&steps(), 3, &answers(&["staff", "Hello!", "Bye!"])).unwrap();

        assert_eq!(conversation.len(), 4);
        assert_eq!(conversation.turns[1], Turn::Assistant("Say hello".into()));
        assert_eq!(conversation.turns[2], Turn::User("Hello!".into()));
        assert_eq!(conversation.turns[3], Turn::User("Bye!".into()));
    }

    #[test]
    fn lookback_requires_two_answers() {
        let conversation = build_conversation(&steps(), 2, &answers(&["Hello!"])).unwrap();
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn out_of_range_steps_have_no_conversation() {
        assert!(build_conversation(&steps(), 0, &answers(&["a"])).is_none());
        assert!(build_conversation(&steps(), 4, &answers(&["a", "b", "c", "d"])).is_none());
        assert!(build_conversation(&[], 1, &answers(&["a"])).is_none());
    }
}
