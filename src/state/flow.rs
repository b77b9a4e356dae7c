//! Survey flow state machine
//!
//! Sequences disclaimer -> mobile verification -> stepping -> review ->
//! consent -> submission -> completion on top of the form layer.
//!
//! The flow never performs I/O. Intents return [`Effect`]s for the caller to
//! run; results come back as [`Completion`]s through [`SurveyFlow::apply`].
//! Completions that no longer match the current state are discarded.

use super::forms::{
    submission, Advance, AnswerState, AnswerValue, ChoiceOutcome, ChoiceRequest, FormStore,
    Retreat, StepNavigator, SubmissionPayload, SubmissionReceipt,
};
use super::schema::{assemble_steps, ChoiceOption, Language, Question, Step};
use crate::error::SurveyError;

/// Where the respondent is in the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Disclaimer,
    MobileCheck,
    Stepping,
    Review,
    Consent,
    Submitting,
    Thanked,
    AlreadySubmitted,
}

impl FlowState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disclaimer => "Disclaimer",
            Self::MobileCheck => "Mobile Verification",
            Self::Stepping => "Survey",
            Self::Review => "Review",
            Self::Consent => "Consent",
            Self::Submitting => "Submitting",
            Self::Thanked => "Thank You",
            Self::AlreadySubmitted => "Already Submitted",
        }
    }
}

/// Schema load status for the active language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    Loading,
    Ready,
    Failed(SurveyError),
}

/// Asynchronous work requested by the flow
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadSchema { language: Language, generation: u64 },
    FetchChoices(ChoiceRequest),
    CheckMobile { number: String },
    Submit(SubmissionPayload),
}

/// Result of an [`Effect`]
#[derive(Debug, Clone)]
pub enum Completion {
    /// Raw server steps, before the location step is added
    Schema {
        language: Language,
        generation: u64,
        result: Result<Vec<Step>, SurveyError>,
    },
    Choices {
        request: ChoiceRequest,
        result: Result<Vec<ChoiceOption>, SurveyError>,
    },
    MobileChecked {
        number: String,
        /// `true` when a response already exists for this number
        result: Result<bool, SurveyError>,
    },
    Submitted {
        result: Result<SubmissionReceipt, SurveyError>,
    },
}

/// One answered question for the review page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub step_title: String,
    pub question_id: String,
    pub label: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default)]
struct MobileEntry {
    input: String,
    /// Last complete number a check was issued for
    checked: Option<String>,
    /// Number whose check is in flight
    pending: Option<String>,
    /// Number confirmed as not yet used
    verified: Option<String>,
    error: Option<SurveyError>,
}

/// The survey session
#[derive(Debug, Clone)]
pub struct SurveyFlow {
    state: FlowState,
    disclaimer_accepted: bool,
    steps: Vec<Step>,
    schema: SchemaStatus,
    generation: u64,
    form: FormStore,
    navigator: StepNavigator,
    mobile: MobileEntry,
    consent: bool,
    notice: Option<SurveyError>,
    receipt: Option<SubmissionReceipt>,
}

impl SurveyFlow {
    /// Start a session; returns the initial schema and district loads
    pub fn new(language: Language, disclaimer_accepted: bool) -> (Self, Vec<Effect>) {
        let mut flow = Self {
            state: if disclaimer_accepted {
                FlowState::MobileCheck
            } else {
                FlowState::Disclaimer
            },
            disclaimer_accepted,
            steps: Vec::new(),
            schema: SchemaStatus::Loading,
            generation: 0,
            form: FormStore::new(language),
            navigator: StepNavigator::new(),
            mobile: MobileEntry::default(),
            consent: false,
            notice: None,
            receipt: None,
        };
        let root = flow.form.request_root();
        let effects = vec![flow.load_schema_effect(), Effect::FetchChoices(root)];
        (flow, effects)
    }

    // --- queries ---

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn language(&self) -> Language {
        self.form.language()
    }

    pub fn disclaimer_accepted(&self) -> bool {
        self.disclaimer_accepted
    }

    pub fn schema_status(&self) -> &SchemaStatus {
        &self.schema
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn answers(&self) -> &AnswerState {
        self.form.answers()
    }

    pub fn step_index(&self) -> usize {
        self.navigator.index()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.navigator.current(&self.steps)
    }

    pub fn visible_questions(&self) -> Vec<&Question> {
        self.current_step()
            .map(|step| super::forms::visible_questions(step, self.form.answers()))
            .unwrap_or_default()
    }

    pub fn field_options<'a>(&'a self, question: &'a Question) -> &'a [ChoiceOption] {
        self.form.options_for(question)
    }

    /// Required visible questions on the current step still lacking an answer
    pub fn missing_required(&self) -> Vec<&Question> {
        self.current_step()
            .map(|step| self.form.missing_required(step))
            .unwrap_or_default()
    }

    pub fn can_proceed(&self) -> bool {
        self.current_step()
            .is_some_and(|step| self.form.can_proceed(step))
    }

    pub fn mobile_input(&self) -> &str {
        &self.mobile.input
    }

    pub fn mobile_pending(&self) -> bool {
        self.mobile.pending.is_some()
    }

    pub fn mobile_error(&self) -> Option<&SurveyError> {
        self.mobile.error.as_ref()
    }

    pub fn consent_given(&self) -> bool {
        self.consent
    }

    /// Latest non-blocking error to show the respondent
    pub fn notice(&self) -> Option<&SurveyError> {
        self.notice.as_ref()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    /// Answered, visible questions across all steps with display text
    pub fn review_entries(&self) -> Vec<ReviewEntry> {
        let answers = self.form.answers();
        self.steps
            .iter()
            .flat_map(|step| {
                super::forms::visible_questions(step, answers)
                    .into_iter()
                    .filter_map(move |q| {
                        let value = answers.get(&q.question_id).filter(|v| !v.is_empty())?;
                        Some(ReviewEntry {
                            step_title: step.title.clone(),
                            question_id: q.question_id.clone(),
                            label: q.label.clone(),
                            answer: self.display_answer(q, value),
                        })
                    })
            })
            .collect()
    }

    fn display_answer(&self, question: &Question, value: &AnswerValue) -> String {
        let options = self.form.options_for(question);
        value
            .codes()
            .into_iter()
            .map(|code| {
                options
                    .iter()
                    .find(|o| o.code == code)
                    .map(|o| o.label.as_str())
                    .unwrap_or(code)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    // --- intents ---

    pub fn accept_disclaimer(&mut self) {
        if self.state == FlowState::Disclaimer {
            self.disclaimer_accepted = true;
            self.transition(FlowState::MobileCheck);
        }
    }

    /// Replace the mobile input. Non-digits are dropped and input is capped
    /// at ten digits; a complete number not yet checked triggers a lookup.
    pub fn input_mobile(&mut self, raw: &str) -> Option<Effect> {
        if self.state != FlowState::MobileCheck || self.mobile.pending.is_some() {
            return None;
        }

        let digits: String = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(submission::CONTACT_LEN)
            .collect();
        self.mobile.input = digits;
        self.mobile.error = None;

        if !submission::is_valid_contact(&self.mobile.input)
            || self.mobile.checked.as_deref() == Some(self.mobile.input.as_str())
        {
            return None;
        }

        let number = self.mobile.input.clone();
        tracing::info!("checking mobile number");
        self.mobile.checked = Some(number.clone());
        self.mobile.pending = Some(number.clone());
        Some(Effect::CheckMobile { number })
    }

    pub fn push_mobile_digit(&mut self, c: char) -> Option<Effect> {
        let mut raw = self.mobile.input.clone();
        raw.push(c);
        self.input_mobile(&raw)
    }

    pub fn pop_mobile_digit(&mut self) {
        let mut raw = self.mobile.input.clone();
        raw.pop();
        self.input_mobile(&raw);
    }

    /// Set an answer on the current survey
    pub fn update_field(&mut self, id: &str, value: AnswerValue) -> Option<Effect> {
        if !self.is_editable() {
            return None;
        }
        self.notice = None;
        self.form.update_field(id, value).map(Effect::FetchChoices)
    }

    /// Pick `code` for a question on the current step: replaces single-select
    /// answers, toggles membership for multi-select ones
    pub fn choose(&mut self, question_id: &str, code: &str) -> Option<Effect> {
        let question = self
            .current_step()?
            .questions
            .iter()
            .find(|q| q.question_id == question_id)?;

        let value = if question.input_type.is_multi() {
            self.form
                .answers()
                .get(question_id)
                .cloned()
                .unwrap_or_else(|| AnswerValue::Multi(Vec::new()))
                .toggled(code)
        } else {
            AnswerValue::single(code)
        };
        self.update_field(question_id, value)
    }

    /// Move to the next step with visible questions, or to review after the last.
    /// Refused while the current step has unanswered required questions.
    pub fn advance(&mut self) -> bool {
        if !self.is_editable() || !self.can_proceed() {
            return false;
        }
        match self.navigator.advance(&self.steps, self.form.answers()) {
            Advance::Moved(_) => true,
            Advance::End => {
                self.transition(FlowState::Review);
                true
            }
        }
    }

    pub fn retreat(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        matches!(
            self.navigator.retreat(&self.steps, self.form.answers()),
            Retreat::Moved(_)
        )
    }

    /// Back from review to the step the respondent left
    pub fn edit_review(&mut self) {
        if self.state == FlowState::Review {
            self.transition(FlowState::Stepping);
        }
    }

    pub fn confirm_review(&mut self) {
        if self.state == FlowState::Review {
            self.consent = false;
            self.transition(FlowState::Consent);
        }
    }

    pub fn give_consent(&mut self, given: bool) {
        if self.state == FlowState::Consent {
            self.consent = given;
        }
    }

    pub fn cancel_consent(&mut self) {
        if self.state == FlowState::Consent {
            self.consent = false;
            self.transition(FlowState::Review);
        }
    }

    /// Assemble and send the response. Validation failures stay on the consent
    /// screen and never reach the network.
    pub fn submit(&mut self) -> Option<Effect> {
        if self.state != FlowState::Consent || !self.consent {
            return None;
        }

        let contact = self.mobile.verified.clone().unwrap_or_default();
        match submission::build(self.form.answers(), &contact) {
            Ok(payload) => {
                self.notice = None;
                self.transition(FlowState::Submitting);
                Some(Effect::Submit(payload))
            }
            Err(err) => {
                tracing::warn!("submission blocked: {err}");
                self.notice = Some(err.into());
                None
            }
        }
    }

    /// From the already-submitted screen, enter a different number
    pub fn try_again(&mut self) {
        if self.state == FlowState::AlreadySubmitted {
            self.mobile = MobileEntry::default();
            self.transition(FlowState::MobileCheck);
        }
    }

    /// Discard all answers and start the questionnaire over
    pub fn reset(&mut self) -> bool {
        if !matches!(
            self.state,
            FlowState::Stepping | FlowState::Review | FlowState::Consent
        ) {
            return false;
        }
        self.form.clear_answers();
        self.navigator.start(&self.steps, self.form.answers());
        self.consent = false;
        self.notice = None;
        self.transition(FlowState::Stepping);
        true
    }

    /// Switch language: reloads the schema and districts and discards answers
    pub fn set_language(&mut self, language: Language) -> Vec<Effect> {
        if language == self.language() || self.state == FlowState::Submitting {
            return Vec::new();
        }
        tracing::info!(language = language.code(), "switching language");

        let root = self.form.reset_for_language(language);
        self.steps.clear();
        self.schema = SchemaStatus::Loading;
        self.navigator = StepNavigator::new();
        self.consent = false;
        self.notice = None;
        if matches!(self.state, FlowState::Review | FlowState::Consent) {
            self.transition(FlowState::Stepping);
        }
        vec![self.load_schema_effect(), Effect::FetchChoices(root)]
    }

    /// Reload after a failed schema load
    pub fn retry_schema(&mut self) -> Vec<Effect> {
        if !matches!(self.schema, SchemaStatus::Failed(_)) {
            return Vec::new();
        }
        self.schema = SchemaStatus::Loading;
        let root = self.form.request_root();
        vec![self.load_schema_effect(), Effect::FetchChoices(root)]
    }

    // --- completions ---

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Schema {
                language,
                generation,
                result,
            } => self.apply_schema(language, generation, result),
            Completion::Choices { request, result } => {
                let failure = result.as_ref().err().cloned();
                if self.form.apply_choices(&request, result) == ChoiceOutcome::Failed {
                    self.notice = failure;
                }
            }
            Completion::MobileChecked { number, result } => self.apply_mobile(number, result),
            Completion::Submitted { result } => self.apply_submitted(result),
        }
    }

    fn apply_schema(
        &mut self,
        language: Language,
        generation: u64,
        result: Result<Vec<Step>, SurveyError>,
    ) {
        if generation != self.generation || language != self.language() {
            tracing::debug!(generation, "discarding stale schema");
            return;
        }

        match result {
            Ok(server_steps) => {
                self.steps = assemble_steps(server_steps, language);
                self.navigator.start(&self.steps, self.form.answers());
                self.schema = SchemaStatus::Ready;
                tracing::info!(steps = self.steps.len(), "survey schema loaded");
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.steps.clear();
                self.schema = SchemaStatus::Failed(err);
            }
        }
    }

    fn apply_mobile(&mut self, number: String, result: Result<bool, SurveyError>) {
        if self.state != FlowState::MobileCheck
            || self.mobile.pending.as_deref() != Some(number.as_str())
        {
            tracing::debug!("discarding stale mobile check");
            return;
        }
        self.mobile.pending = None;

        match result {
            Ok(true) => self.transition(FlowState::AlreadySubmitted),
            Ok(false) => {
                self.mobile.verified = Some(number);
                self.transition(FlowState::Stepping);
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.mobile.checked = None;
                self.mobile.error = Some(err);
            }
        }
    }

    fn apply_submitted(&mut self, result: Result<SubmissionReceipt, SurveyError>) {
        if self.state != FlowState::Submitting {
            return;
        }

        match result {
            Ok(receipt) => {
                tracing::info!(reference_id = %receipt.reference_id, "survey submitted");
                self.receipt = Some(receipt);
                self.form.clear_answers();
                self.transition(FlowState::Thanked);
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.consent = false;
                self.notice = Some(err);
                self.transition(FlowState::Review);
            }
        }
    }

    // --- helpers ---

    fn is_editable(&self) -> bool {
        self.state == FlowState::Stepping && self.schema == SchemaStatus::Ready
    }

    fn load_schema_effect(&mut self) -> Effect {
        self.generation += 1;
        Effect::LoadSchema {
            language: self.language(),
            generation: self.generation,
        }
    }

    fn transition(&mut self, next: FlowState) {
        if self.state != next {
            tracing::info!(from = self.state.label(), to = next.label(), "flow transition");
            self.state = next;
        }
    }
}
