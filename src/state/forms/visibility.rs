//! Declarative question visibility

use super::field::AnswerState;
use crate::state::schema::{Question, Step};

/// Whether `question` is currently displayable (and therefore eligible to be required).
///
/// A question without a condition is always visible. Otherwise every
/// prerequisite must hold a single value contained in its permitted set;
/// unset, empty, or list-valued prerequisites make the question invisible.
pub fn is_visible(question: &Question, answers: &AnswerState) -> bool {
    let Some(condition) = &question.visible_when else {
        return true;
    };

    condition.iter().all(|(prerequisite, permitted)| {
        answers
            .single(prerequisite)
            .is_some_and(|value| permitted.iter().any(|p| p == value))
    })
}

/// Questions of `step` that are currently visible, in schema order
pub fn visible_questions<'a>(step: &'a Step, answers: &AnswerState) -> Vec<&'a Question> {
    step.questions
        .iter()
        .filter(|q| is_visible(q, answers))
        .collect()
}

/// Number of currently visible questions in `step`
pub fn visible_count(step: &Step, answers: &AnswerState) -> usize {
    step.questions
        .iter()
        .filter(|q| is_visible(q, answers))
        .count()
}
