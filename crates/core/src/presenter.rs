//! Result presenter state machine.
//!
//! `Idle -> Loading -> {Success, Error}`, re-entrant into `Loading` from any
//! non-loading state. The presenter is the only owner of [`UiState`]; front-ends
//! read it through the query methods and feed it [`UiEvent`]s.

use tracing::{debug, info, warn};

use crate::{
    client::{AnalysisBackend, ClientError},
    error::ValidationError,
    types::{AnalysisRequest, AnalysisResult},
    video_id::extract_video_id,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(Box<AnalysisResult>),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Transcript,
    Misconceptions,
    Summary,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Transcript, Tab::Misconceptions, Tab::Summary];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Transcript => "transcript",
            Tab::Misconceptions => "misconceptions",
            Tab::Summary => "summary",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Transcript => "Transcript",
            Tab::Misconceptions => "Misconceptions",
            Tab::Summary => "Summary",
        }
    }
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Entered `Loading`; the caller must issue exactly this request.
    Dispatch(AnalysisRequest),
    /// A request is already in flight.
    Busy,
    Invalid(ValidationError),
}

#[derive(Debug)]
pub enum UiEvent {
    InputChanged(String),
    Submit,
    TabSelected(Tab),
    Analyzed(Result<AnalysisResult, ClientError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Dispatch(AnalysisRequest),
}

#[derive(Debug, Default)]
pub struct ResultPresenter {
    input: String,
    state: UiState,
    validation_error: Option<String>,
    active_tab: Tab,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading)
    }

    pub fn busy_visible(&self) -> bool {
        self.is_loading()
    }

    pub fn results_visible(&self) -> bool {
        matches!(self.state, UiState::Success(_))
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.is_loading()
    }

    /// Visible error text: a pending validation message wins over a request error.
    pub fn error_text(&self) -> Option<&str> {
        if let Some(message) = &self.validation_error {
            return Some(message.as_str());
        }
        match &self.state {
            UiState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            UiState::Success(result) => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Validate the current input and, if accepted, enter `Loading`.
    pub fn submit(&mut self) -> Submission {
        if self.is_loading() {
            debug!("submit ignored, request already in flight");
            return Submission::Busy;
        }

        let video_id = match extract_video_id(&self.input) {
            Ok(video_id) => video_id,
            Err(e) => {
                debug!(error = %e, "submit rejected");
                self.validation_error = Some(e.to_string());
                return Submission::Invalid(e);
            }
        };

        self.validation_error = None;
        self.state = UiState::Loading;
        info!(video_id = %video_id, "analysis requested");

        Submission::Dispatch(AnalysisRequest::new(self.input.trim(), video_id))
    }

    /// `Loading -> Success`. Ignored in any other state.
    pub fn resolve(&mut self, result: AnalysisResult) {
        if !self.is_loading() {
            warn!("resolve ignored, no request in flight");
            return;
        }
        debug!(
            lines = result.transcript.len(),
            misconceptions = result.misconceptions.len(),
            "analysis succeeded"
        );
        self.state = UiState::Success(Box::new(result));
    }

    /// `Loading -> Error`. Ignored in any other state.
    pub fn reject(&mut self, error: &ClientError) {
        if !self.is_loading() {
            warn!("reject ignored, no request in flight");
            return;
        }
        warn!(error = %error, "analysis failed");
        self.state = UiState::Error(error.user_message());
    }

    pub fn reset(&mut self) {
        if self.is_loading() {
            return;
        }
        self.state = UiState::Idle;
        self.validation_error = None;
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn update(&mut self, event: UiEvent) -> Effect {
        match event {
            UiEvent::InputChanged(input) => self.set_input(input),
            UiEvent::Submit => {
                if let Submission::Dispatch(request) = self.submit() {
                    return Effect::Dispatch(request);
                }
            }
            UiEvent::TabSelected(tab) => self.switch_tab(tab),
            UiEvent::Analyzed(Ok(result)) => self.resolve(result),
            UiEvent::Analyzed(Err(e)) => self.reject(&e),
        }
        Effect::None
    }

    /// Submit `input` and drive the single resulting request to completion.
    pub async fn run<B>(&mut self, backend: &B, input: &str) -> Submission
    where
        B: AnalysisBackend + ?Sized,
    {
        self.set_input(input);
        let submission = self.submit();
        if let Submission::Dispatch(request) = &submission {
            match backend.analyze(request).await {
                Ok(result) => self.resolve(result),
                Err(e) => self.reject(&e),
            }
        }
        submission
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::types::SummaryStats;

    const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn empty_result() -> AnalysisResult {
        AnalysisResult {
            video_url: Some(URL.to_string()),
            transcript: Vec::new(),
            misconceptions: Vec::new(),
            summary_facts: Vec::new(),
            summary: SummaryStats::default(),
        }
    }

    fn assert_exclusive(p: &ResultPresenter) {
        assert!(!(p.busy_visible() && p.results_visible()));
    }

    struct FakeBackend {
        calls: AtomicUsize,
        outcome: fn() -> Result<AnalysisResult, ClientError>,
    }

    impl FakeBackend {
        fn new(outcome: fn() -> Result<AnalysisResult, ClientError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome,
            }
        }
    }

    #[async_trait]
    impl AnalysisBackend for FakeBackend {
        async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    #[test]
    fn test_initial_state() {
        let p = ResultPresenter::new();
        assert_eq!(p.state(), &UiState::Idle);
        assert!(p.trigger_enabled());
        assert!(!p.busy_visible());
        assert!(!p.results_visible());
        assert_eq!(p.error_text(), None);
        assert_eq!(p.active_tab(), Tab::Transcript);
    }

    #[test]
    fn test_valid_submit_enters_loading_synchronously() {
        let mut p = ResultPresenter::new();
        p.set_input(format!("  {URL}  "));

        let Submission::Dispatch(request) = p.submit() else {
            panic!("expected dispatch");
        };

        assert_eq!(request.url, URL);
        assert_eq!(request.video_id.as_str(), "dQw4w9WgXcQ");
        assert!(p.busy_visible());
        assert!(!p.trigger_enabled());
        assert!(!p.results_visible());
        assert_eq!(p.error_text(), None);
    }

    #[test]
    fn test_invalid_submit_stays_idle_with_message() {
        let mut p = ResultPresenter::new();
        p.set_input("https://example.com/video");

        assert_eq!(p.submit(), Submission::Invalid(ValidationError::InvalidUrl));
        assert_eq!(p.state(), &UiState::Idle);
        assert_eq!(p.error_text(), Some("Invalid YouTube URL"));
        assert!(p.trigger_enabled());

        p.set_input("");
        assert_eq!(p.submit(), Submission::Invalid(ValidationError::EmptyInput));
        assert_eq!(p.error_text(), Some("Please enter a YouTube URL"));
    }

    #[test]
    fn test_submit_while_loading_is_busy() {
        let mut p = ResultPresenter::new();
        p.set_input(URL);
        assert!(matches!(p.submit(), Submission::Dispatch(_)));

        assert_eq!(p.submit(), Submission::Busy);
        assert_eq!(p.update(UiEvent::Submit), Effect::None);
        assert!(p.is_loading());
    }

    #[test]
    fn test_resolve_reveals_results() {
        let mut p = ResultPresenter::new();
        p.set_input(URL);
        p.submit();
        p.resolve(empty_result());

        assert!(p.results_visible());
        assert!(!p.busy_visible());
        assert!(p.trigger_enabled());
        assert_eq!(p.result(), Some(&empty_result()));
        assert_exclusive(&p);
    }

    #[test]
    fn test_reject_shows_backend_message_or_fallback() {
        let mut p = ResultPresenter::new();
        p.set_input(URL);
        p.submit();
        p.reject(&ClientError::BackendReported {
            message: "No valid transcript found".to_string(),
        });
        assert_eq!(p.error_text(), Some("No valid transcript found"));
        assert!(!p.results_visible());
        assert!(p.trigger_enabled());

        p.submit();
        assert_eq!(p.error_text(), None);
        p.reject(&ClientError::Protocol {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        });
        assert_eq!(p.error_text(), Some(crate::client::GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_stale_transitions_are_ignored() {
        let mut p = ResultPresenter::new();
        p.resolve(empty_result());
        assert_eq!(p.state(), &UiState::Idle);

        p.reject(&ClientError::BackendReported {
            message: "late".to_string(),
        });
        assert_eq!(p.state(), &UiState::Idle);
    }

    #[test]
    fn test_resubmit_from_success_hides_previous_results() {
        let mut p = ResultPresenter::new();
        p.set_input(URL);
        p.submit();
        p.resolve(empty_result());

        assert!(matches!(p.submit(), Submission::Dispatch(_)));
        assert!(p.busy_visible());
        assert!(!p.results_visible());
        assert_exclusive(&p);
    }

    #[test]
    fn test_invalid_submit_after_success_keeps_results() {
        let mut p = ResultPresenter::new();
        p.set_input(URL);
        p.submit();
        p.resolve(empty_result());

        p.set_input("nope");
        p.submit();
        assert!(p.results_visible());
        assert_eq!(p.error_text(), Some("Invalid YouTube URL"));
    }

    #[test]
    fn test_tab_switching_is_idempotent_and_keeps_result() {
        let mut p = ResultPresenter::new();
        p.set_input(URL);
        p.submit();
        p.resolve(empty_result());

        p.switch_tab(Tab::Summary);
        p.switch_tab(Tab::Summary);
        assert_eq!(p.active_tab(), Tab::Summary);
        assert_eq!(p.result(), Some(&empty_result()));

        p.update(UiEvent::TabSelected(Tab::Misconceptions));
        assert_eq!(p.active_tab(), Tab::Misconceptions);
        assert_eq!(
            Tab::ALL.iter().filter(|t| **t == p.active_tab()).count(),
            1
        );
    }

    #[test]
    fn test_update_drives_full_cycle() {
        let mut p = ResultPresenter::new();
        assert_eq!(p.update(UiEvent::InputChanged(URL.to_string())), Effect::None);

        let Effect::Dispatch(request) = p.update(UiEvent::Submit) else {
            panic!("expected dispatch");
        };
        assert_eq!(request.url, URL);
        assert_exclusive(&p);

        p.update(UiEvent::Analyzed(Ok(empty_result())));
        assert!(p.results_visible());
        assert_exclusive(&p);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut p = ResultPresenter::new();
        p.set_input(URL);
        p.submit();
        p.reset();
        assert!(p.is_loading());

        p.resolve(empty_result());
        p.reset();
        assert_eq!(p.state(), &UiState::Idle);
    }

    #[tokio::test]
    async fn test_run_issues_exactly_one_call() {
        let backend = FakeBackend::new(|| Ok(empty_result()));
        let mut p = ResultPresenter::new();

        let submission = p.run(&backend, URL).await;

        assert!(matches!(submission, Submission::Dispatch(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert!(p.results_visible());
    }

    #[tokio::test]
    async fn test_run_with_invalid_input_never_calls_backend() {
        let backend = FakeBackend::new(|| Ok(empty_result()));
        let mut p = ResultPresenter::new();

        let submission = p.run(&backend, "   ").await;

        assert_eq!(submission, Submission::Invalid(ValidationError::EmptyInput));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_run_failure_renders_error_without_results() {
        let backend = FakeBackend::new(|| {
            Err(ClientError::BackendReported {
                message: "Invalid YouTube URL".to_string(),
            })
        });
        let mut p = ResultPresenter::new();

        p.run(&backend, URL).await;

        assert_eq!(p.error_text(), Some("Invalid YouTube URL"));
        assert!(!p.results_visible());
        assert!(!p.busy_visible());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }
}
