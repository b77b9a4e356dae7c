//! Form state store: the single owner of answers and location option caches

use super::cascade::{ChoiceOutcome, ChoiceRequest, Level, LocationCascade};
use super::field::{AnswerState, AnswerValue};
use super::visibility::{is_visible, visible_questions};
use crate::state::schema::{ChoiceOption, Language, Question, Step};

/// Answers plus the location cascade they drive.
///
/// All mutation goes through [`FormStore::update_field`], [`FormStore::apply_choices`]
/// and the reset methods; each completes synchronously, so callers never see a
/// new ancestor value next to stale descendants.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    answers: AnswerState,
    cascade: LocationCascade,
    language: Language,
}

impl FormStore {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn answers(&self) -> &AnswerState {
        &self.answers
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn cascade(&self) -> &LocationCascade {
        &self.cascade
    }

    /// Set `id` to `value`, cascading if `id` is a location level.
    ///
    /// Returns the option request for the next location level when one is
    /// needed. Re-selecting the value a level already holds clears nothing; it
    /// only re-requests the next level's list if that list failed to load.
    pub fn update_field(&mut self, id: &str, value: AnswerValue) -> Option<ChoiceRequest> {
        let Some(level) = Level::from_field_id(id) else {
            self.answers.insert(id, value);
            return None;
        };

        let new_value = value.as_single().map(str::to_string);
        if self.answers.single(id) == new_value.as_deref() {
            return new_value
                .as_deref()
                .and_then(|v| self.cascade.refetch_child(level, v, self.language));
        }

        match &new_value {
            Some(v) => self.answers.insert(id, AnswerValue::single(v.clone())),
            None => {
                self.answers.remove(id);
            }
        }

        self.cascade
            .on_level_changed(level, new_value.as_deref(), &mut self.answers, self.language)
    }

    /// Apply a finished option fetch
    pub fn apply_choices<E: std::fmt::Display>(
        &mut self,
        request: &ChoiceRequest,
        result: Result<Vec<ChoiceOption>, E>,
    ) -> ChoiceOutcome {
        self.cascade
            .apply(request, result, &self.answers, self.language)
    }

    /// Every required, currently visible question in `step` has a non-empty answer
    pub fn can_proceed(&self, step: &Step) -> bool {
        step.questions
            .iter()
            .filter(|q| q.required && is_visible(q, &self.answers))
            .all(|q| self.answers.is_answered(&q.question_id))
    }

    /// Required visible questions in `step` that still lack an answer
    pub fn missing_required<'a>(&self, step: &'a Step) -> Vec<&'a Question> {
        visible_questions(step, &self.answers)
            .into_iter()
            .filter(|q| q.required && !self.answers.is_answered(&q.question_id))
            .collect()
    }

    /// Options to offer for `question`: the cascade list for location levels,
    /// otherwise the question's static list
    pub fn options_for<'a>(&'a self, question: &'a Question) -> &'a [ChoiceOption] {
        match Level::from_field_id(&question.question_id) {
            Some(level) => self.cascade.options(level),
            None => &question.options,
        }
    }

    /// Drop all answers and deeper location lists, keeping the district list
    pub fn clear_answers(&mut self) {
        self.answers.clear();
        self.cascade
            .on_level_changed(Level::District, None, &mut self.answers, self.language);
    }

    /// Re-request the district list for the current language
    pub fn request_root(&mut self) -> ChoiceRequest {
        self.cascade.load_root(self.language)
    }

    /// Switch language: everything is discarded and the district list re-requested
    pub fn reset_for_language(&mut self, language: Language) -> ChoiceRequest {
        self.language = language;
        self.answers.clear();
        self.cascade.reset();
        self.cascade.load_root(language)
    }
}
