//! Application state and core logic

use crate::api::{ApiError, Backend};
use crate::config::SurveyConfig;
use crate::error::SurveyError;
use crate::state::{AppState, Completion, Effect, FlowState, SchemaStatus, SurveyFlow};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::Instrument;
use uuid::Uuid;

/// Main application struct
pub struct App {
    /// The survey session
    pub flow: SurveyFlow,
    /// Cursor and status state
    pub state: AppState,
    pub config: SurveyConfig,
    backend: Backend,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    session_id: Uuid,
    /// Whether language changes are written back to the config file
    persist_config: bool,
    quit: bool,
}

impl App {
    /// Create the app and start the initial schema and district loads.
    /// Must be called from within a tokio runtime.
    pub fn new(config: SurveyConfig, backend: Backend, session_id: Uuid) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (flow, effects) = SurveyFlow::new(config.language, false);

        let app = Self {
            flow,
            state: AppState::default(),
            config,
            backend,
            completions_tx,
            completions_rx,
            session_id,
            persist_config: true,
            quit: false,
        };
        app.run_effects(effects);
        app
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Spawn every effect; each reports back through the completion channel
    pub fn run_effects(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            let backend = self.backend.clone();
            let tx = self.completions_tx.clone();
            let span = tracing::info_span!("effect", session = %self.session_id);
            tokio::spawn(
                async move {
                    let completion = execute(&backend, effect).await;
                    // Receiver only closes on shutdown
                    let _ = tx.send(completion);
                }
                .instrument(span),
            );
        }
    }

    fn run_effect(&self, effect: Option<Effect>) {
        self.run_effects(effect);
    }

    /// Apply every completion that has arrived; returns how many were applied
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion without applying it
    #[cfg(test)]
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    pub fn apply(&mut self, completion: Completion) {
        self.flow.apply(completion);
        self.sync_cursor();
    }

    /// Handle a key press for the current flow state
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.state.status_message = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('t') => {
                    self.toggle_language();
                    return Ok(());
                }
                KeyCode::Char('r') => {
                    if self.flow.reset() {
                        self.state.reset_cursor();
                        self.state.status_message = Some("Survey reset".to_string());
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.flow.state() {
            FlowState::Disclaimer => self.handle_disclaimer_key(key),
            FlowState::MobileCheck => self.handle_mobile_key(key),
            FlowState::Stepping => self.handle_stepping_key(key),
            FlowState::Review => self.handle_review_key(key),
            FlowState::Consent => self.handle_consent_key(key),
            FlowState::Submitting => {}
            FlowState::Thanked => self.handle_thanked_key(key),
            FlowState::AlreadySubmitted => self.handle_already_submitted_key(key),
        }

        self.sync_cursor();
        Ok(())
    }

    fn handle_disclaimer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('a') => self.flow.accept_disclaimer(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_mobile_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let effect = self.flow.push_mobile_digit(c);
                self.run_effect(effect);
            }
            KeyCode::Backspace => self.flow.pop_mobile_digit(),
            _ => {}
        }
    }

    fn handle_stepping_key(&mut self, key: KeyEvent) {
        if let SchemaStatus::Failed(_) = self.flow.schema_status() {
            if key.code == KeyCode::Char('r') {
                let effects = self.flow.retry_schema();
                self.run_effects(effects);
            }
            return;
        }

        let question_count = self.flow.visible_questions().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.next_question(question_count),
            KeyCode::Up | KeyCode::Char('k') => self.state.prev_question(),
            KeyCode::Right | KeyCode::Char('l') => {
                let count = self.focused_option_count();
                self.state.next_option(count);
            }
            KeyCode::Left | KeyCode::Char('h') => self.state.prev_option(),
            KeyCode::Char(' ') => self.choose_focused(),
            KeyCode::Enter | KeyCode::Char('n') => {
                if !self.flow.advance() {
                    self.state.status_message = Some(missing_message(&self.flow));
                }
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('p') => {
                self.flow.retreat();
            }
            _ => {}
        }
    }

    fn handle_review_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            KeyCode::Esc | KeyCode::Char('e') => self.flow.edit_review(),
            KeyCode::Enter => self.flow.confirm_review(),
            _ => {}
        }
    }

    fn handle_consent_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') => {
                let given = !self.flow.consent_given();
                self.flow.give_consent(given);
            }
            KeyCode::Enter => {
                let effect = self.flow.submit();
                self.run_effect(effect);
            }
            KeyCode::Esc => self.flow.cancel_consent(),
            _ => {}
        }
    }

    fn handle_thanked_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') => self.copy_reference_id(),
            KeyCode::Char('q') | KeyCode::Enter => self.quit = true,
            _ => {}
        }
    }

    fn handle_already_submitted_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('t') => self.flow.try_again(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Number of options offered by the focused question
    fn focused_option_count(&self) -> usize {
        self.flow
            .visible_questions()
            .get(self.state.cursor.question)
            .map(|q| self.flow.field_options(q).len())
            .unwrap_or(0)
    }

    /// Select (or toggle) the option under the cursor
    fn choose_focused(&mut self) {
        let picked = self
            .flow
            .visible_questions()
            .get(self.state.cursor.question)
            .and_then(|q| {
                self.flow
                    .field_options(q)
                    .get(self.state.cursor.option)
                    .map(|o| (q.question_id.clone(), o.code.clone()))
            });

        if let Some((question_id, code)) = picked {
            let effect = self.flow.choose(&question_id, &code);
            self.run_effect(effect);
        }
    }

    fn toggle_language(&mut self) {
        let next = self.flow.language().toggle();
        let effects = self.flow.set_language(next);
        if effects.is_empty() {
            return;
        }

        self.state.reset_cursor();
        self.config.language = next;
        if self.persist_config {
            if let Err(e) = self.config.save() {
                tracing::warn!("Failed to save language preference: {e}");
                self.state
                    .push_error(format!("Failed to save language preference: {e}"));
            }
        }
        self.run_effects(effects);
    }

    fn copy_reference_id(&mut self) {
        let Some(reference_id) = self.flow.receipt().map(|r| r.reference_id.clone()) else {
            return;
        };
        match copy_to_clipboard(&reference_id) {
            Ok(()) => self.state.status_message = Some("Reference ID copied".to_string()),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {e}");
                self.state.push_error(format!("Failed to copy: {e}"));
            }
        }
    }

    fn sync_cursor(&mut self) {
        let step = (self.flow.state() == FlowState::Stepping).then(|| self.flow.step_index());
        let count = self.flow.visible_questions().len();
        self.state.sync_cursor(step, count);
    }
}

/// Run one effect against the backend, mapping failures into [`SurveyError`]
pub async fn execute(backend: &Backend, effect: Effect) -> Completion {
    match effect {
        Effect::LoadSchema {
            language,
            generation,
        } => Completion::Schema {
            language,
            generation,
            result: backend
                .schema
                .fetch_schema(language)
                .await
                .map_err(|e| SurveyError::SchemaLoad(describe(&e))),
        },
        Effect::FetchChoices(request) => {
            let result = backend
                .choices
                .fetch_choices(request.level, request.parent.clone(), request.language)
                .await
                .map_err(|e| SurveyError::ChoiceLoad {
                    level: request.level,
                    message: describe(&e),
                });
            Completion::Choices { request, result }
        }
        Effect::CheckMobile { number } => {
            let result = backend
                .mobile
                .check_mobile(&number)
                .await
                .map_err(|e| SurveyError::MobileCheck(describe(&e)));
            Completion::MobileChecked { number, result }
        }
        Effect::Submit(payload) => Completion::Submitted {
            result: backend
                .submissions
                .submit(payload)
                .await
                .map_err(|e| SurveyError::Submission(describe(&e))),
        },
    }
}

/// User-facing text for a backend failure; server `detail` wins when present
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Status(_, detail)) => detail.clone(),
        _ => err.to_string(),
    }
}

/// Status text naming the questions that block moving on
fn missing_message(flow: &SurveyFlow) -> String {
    let labels: Vec<&str> = flow
        .missing_required()
        .into_iter()
        .map(|q| q.label.as_str())
        .collect();
    if labels.is_empty() {
        "Please answer all required questions".to_string()
    } else {
        format!("Please answer: {}", labels.join(", "))
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        MockChoiceProvider, MockMobileCheckSink, MockSchemaProvider, MockSubmissionSink,
    };
    use crate::state::{
        ChoiceOption, ChoiceRequest, InputKind, Language, Level, Question, Step,
        SubmissionPayload, SubmissionReceipt,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn household() -> Step {
        Step {
            step_id: "HOUSEHOLD".into(),
            title: "Household".into(),
            step_number: 1,
            total_steps: 1,
            questions: vec![Question {
                question_id: "owns_land".into(),
                label: "Do you own land?".into(),
                input_type: InputKind::SingleSelectTile,
                required: true,
                options: vec![ChoiceOption::new("yes", "Yes"), ChoiceOption::new("no", "No")],
                visible_when: None,
                row_group: None,
                depends_on: None,
            }],
        }
    }

    struct Mocks {
        schema: MockSchemaProvider,
        choices: MockChoiceProvider,
        mobile: MockMobileCheckSink,
        submissions: MockSubmissionSink,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                schema: MockSchemaProvider::new(),
                choices: MockChoiceProvider::new(),
                mobile: MockMobileCheckSink::new(),
                submissions: MockSubmissionSink::new(),
            }
        }

        /// Schema and every location level answer successfully
        fn healthy() -> Self {
            let mut mocks = Self::new();
            mocks
                .schema
                .expect_fetch_schema()
                .returning(|_| Ok(vec![household()]));
            mocks
                .choices
                .expect_fetch_choices()
                .returning(|level, _, _| {
                    let code = (level.index() + 1).to_string();
                    Ok(vec![ChoiceOption::new(code, format!("{level} one"))])
                });
            mocks
        }

        fn backend(self) -> Backend {
            Backend {
                schema: Arc::new(self.schema),
                choices: Arc::new(self.choices),
                mobile: Arc::new(self.mobile),
                submissions: Arc::new(self.submissions),
            }
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn new_app(mocks: Mocks) -> App {
        let mut app = App::new(SurveyConfig::default(), mocks.backend(), Uuid::new_v4());
        app.persist_config = false;
        app
    }

    /// Apply `n` completions as they arrive
    async fn settle(app: &mut App, n: usize) {
        for _ in 0..n {
            let completion = app.next_completion().await.unwrap();
            app.apply(completion);
        }
    }

    async fn type_mobile(app: &mut App, number: &str) {
        for c in number.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    mod effects {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_schema_failure_maps_to_schema_load() {
            let mut mocks = Mocks::new();
            mocks
                .schema
                .expect_fetch_schema()
                .returning(|_| Err(anyhow::anyhow!("connection refused")));
            let backend = mocks.backend();

            let completion = execute(
                &backend,
                Effect::LoadSchema {
                    language: Language::En,
                    generation: 3,
                },
            )
            .await;

            match completion {
                Completion::Schema {
                    generation, result, ..
                } => {
                    assert_eq!(generation, 3);
                    assert_eq!(
                        result,
                        Err(SurveyError::SchemaLoad("connection refused".into()))
                    );
                }
                other => panic!("unexpected completion {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_choices_forward_parent_and_keep_request() {
            let mut mocks = Mocks::new();
            mocks
                .choices
                .expect_fetch_choices()
                .withf(|level, parent, lang| {
                    *level == Level::Mandal && parent.as_deref() == Some("7") && *lang == Language::Te
                })
                .times(1)
                .returning(|_, _, _| Ok(vec![ChoiceOption::new("70", "Ponnur")]));
            let backend = mocks.backend();
            let request = ChoiceRequest {
                level: Level::Mandal,
                parent: Some("7".into()),
                language: Language::Te,
            };

            let completion = execute(&backend, Effect::FetchChoices(request.clone())).await;

            match completion {
                Completion::Choices {
                    request: echoed,
                    result,
                } => {
                    assert_eq!(echoed, request);
                    assert_eq!(result, Ok(vec![ChoiceOption::new("70", "Ponnur")]));
                }
                other => panic!("unexpected completion {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_choice_failure_names_level() {
            let mut mocks = Mocks::new();
            mocks
                .choices
                .expect_fetch_choices()
                .returning(|_, _, _| Err(anyhow::anyhow!("timeout")));
            let backend = mocks.backend();

            let completion = execute(
                &backend,
                Effect::FetchChoices(ChoiceRequest {
                    level: Level::Division,
                    parent: Some("1".into()),
                    language: Language::En,
                }),
            )
            .await;

            let Completion::Choices { result, .. } = completion else {
                panic!("expected choices completion");
            };
            assert_eq!(
                result,
                Err(SurveyError::ChoiceLoad {
                    level: Level::Division,
                    message: "timeout".into()
                })
            );
        }

        #[test]
        fn test_submit_uses_server_detail() {
            let mut mocks = Mocks::new();
            mocks
                .submissions
                .expect_submit()
                .returning(|_| Err(ApiError::Status(400, "Mobile number already used".into()).into()));
            let backend = mocks.backend();

            let completion = tokio_test::block_on(execute(
                &backend,
                Effect::Submit(SubmissionPayload {
                    district: 1,
                    division: 2,
                    mandal: 3,
                    village: 4,
                    mobile_number: "9876543210".into(),
                    answers: Vec::new(),
                }),
            ));

            let Completion::Submitted { result } = completion else {
                panic!("expected submitted completion");
            };
            assert_eq!(
                tokio_test::assert_err!(result),
                SurveyError::Submission("Mobile number already used".into())
            );
        }

        #[test]
        fn test_mobile_check_echoes_number() {
            let mut mocks = Mocks::new();
            mocks
                .mobile
                .expect_check_mobile()
                .times(1)
                .returning(|_| Ok(true));
            let backend = mocks.backend();

            let completion = tokio_test::block_on(execute(
                &backend,
                Effect::CheckMobile {
                    number: "9876543210".into(),
                },
            ));

            let Completion::MobileChecked { number, result } = completion else {
                panic!("expected mobile completion");
            };
            assert_eq!(number, "9876543210");
            assert!(tokio_test::assert_ok!(result));
        }
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_startup_loads_schema_and_districts() {
            let mut app = new_app(Mocks::healthy());
            settle(&mut app, 2).await;

            assert_eq!(app.flow.schema_status(), &SchemaStatus::Ready);
            assert_eq!(app.flow.steps().len(), 2);
            assert_eq!(app.flow.state(), FlowState::Disclaimer);
        }

        #[tokio::test]
        async fn test_walk_through_to_thanks() {
            let mut mocks = Mocks::healthy();
            mocks.mobile.expect_check_mobile().returning(|_| Ok(false));
            mocks.submissions.expect_submit().returning(|payload| {
                assert_eq!(
                    (payload.district, payload.division, payload.mandal, payload.village),
                    (1, 2, 3, 4)
                );
                Ok(SubmissionReceipt {
                    reference_id: "WE-0001".into(),
                    created_at: "2025-01-01T10:00:00Z".into(),
                })
            });
            let mut app = new_app(mocks);
            settle(&mut app, 2).await;

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.flow.state(), FlowState::MobileCheck);

            type_mobile(&mut app, "9876543210").await;
            settle(&mut app, 1).await;
            assert_eq!(app.flow.state(), FlowState::Stepping);

            // each level: focus it, pick the only option, wait for the child list
            for level in Level::ALL {
                assert_eq!(app.state.cursor.question, level.index());
                app.handle_key(key(KeyCode::Char(' '))).unwrap();
                if level.child().is_some() {
                    settle(&mut app, 1).await;
                }
                app.handle_key(key(KeyCode::Down)).unwrap();
            }
            assert!(app.flow.can_proceed());

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.flow.step_index(), 1);
            assert_eq!(app.state.cursor.question, 0);

            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.flow.state(), FlowState::Review);

            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.flow.state(), FlowState::Submitting);

            settle(&mut app, 1).await;
            assert_eq!(app.flow.state(), FlowState::Thanked);
            assert_eq!(app.flow.receipt().unwrap().reference_id, "WE-0001");
        }

        #[tokio::test]
        async fn test_advance_blocked_sets_status() {
            let mut mocks = Mocks::healthy();
            mocks.mobile.expect_check_mobile().returning(|_| Ok(false));
            let mut app = new_app(mocks);
            settle(&mut app, 2).await;
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_mobile(&mut app, "9876543210").await;
            settle(&mut app, 1).await;

            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.flow.step_index(), 0);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Please answer: District, Revenue Division, Mandal, Village/Town")
            );
        }

        #[tokio::test]
        async fn test_existing_number_then_try_again() {
            let mut mocks = Mocks::healthy();
            mocks.mobile.expect_check_mobile().returning(|_| Ok(true));
            let mut app = new_app(mocks);
            settle(&mut app, 2).await;
            app.handle_key(key(KeyCode::Enter)).unwrap();

            type_mobile(&mut app, "9876543210").await;
            settle(&mut app, 1).await;
            assert_eq!(app.flow.state(), FlowState::AlreadySubmitted);

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.flow.state(), FlowState::MobileCheck);
            assert_eq!(app.flow.mobile_input(), "");
        }

        #[tokio::test]
        async fn test_language_toggle_reloads_in_telugu() {
            let mut mocks = Mocks::new();
            mocks
                .schema
                .expect_fetch_schema()
                .returning(|_| Ok(vec![household()]));
            mocks
                .choices
                .expect_fetch_choices()
                .returning(|_, _, lang| Ok(vec![ChoiceOption::new("1", lang.code())]));
            let mut app = new_app(mocks);
            settle(&mut app, 2).await;

            app.handle_key(ctrl('t')).unwrap();
            assert_eq!(app.flow.language(), Language::Te);
            assert_eq!(app.config.language, Language::Te);
            assert_eq!(app.flow.schema_status(), &SchemaStatus::Loading);

            settle(&mut app, 2).await;
            assert_eq!(app.flow.schema_status(), &SchemaStatus::Ready);
            let district = &app.flow.steps()[0].questions[0];
            assert_eq!(
                app.flow.field_options(district),
                vec![ChoiceOption::new("1", "te")].as_slice()
            );
        }

        #[tokio::test]
        async fn test_schema_retry_key() {
            let mut mocks = Mocks::new();
            let mut calls = 0;
            mocks.schema.expect_fetch_schema().returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(anyhow::anyhow!("502 Bad Gateway"))
                } else {
                    Ok(vec![household()])
                }
            });
            mocks
                .choices
                .expect_fetch_choices()
                .returning(|_, _, _| Ok(Vec::new()));
            mocks.mobile.expect_check_mobile().returning(|_| Ok(false));
            let mut app = new_app(mocks);
            settle(&mut app, 2).await;
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_mobile(&mut app, "9876543210").await;
            settle(&mut app, 1).await;

            assert_eq!(app.flow.state(), FlowState::Stepping);
            assert!(matches!(app.flow.schema_status(), SchemaStatus::Failed(_)));

            app.handle_key(key(KeyCode::Char('r'))).unwrap();
            settle(&mut app, 2).await;
            assert_eq!(app.flow.schema_status(), &SchemaStatus::Ready);
            assert_eq!(app.flow.current_step().unwrap().step_id, "LOCATION");
        }

        #[tokio::test]
        async fn test_error_dialog_is_modal() {
            let mut app = new_app(Mocks::healthy());
            settle(&mut app, 2).await;
            app.state.push_error("boom".into());

            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(!app.state.has_errors());

            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(app.should_quit());
        }
    }
}
