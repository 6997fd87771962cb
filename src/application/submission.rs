//! Submission controller: per-form state machine.
//!
//! ```text
//!   Idle ──submit──▶ Pending ──ok──▶ Success
//!     ▲                 │
//!     │                 └──err──▶ Failed
//!     └──────── reset (from any phase) ─────────
//! ```
//!
//! Success and Failed accept a new submission directly. At most one call
//! is in flight per controller; a submit while Pending is ignored.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::application::worker::{CallHandle, CallWorker};
use crate::domain::{Disease, FieldError, PredictionInput, PredictionResult};
use crate::ports::{ApiError, FailureKind, Notification, Notifier, PredictionApi};

/// Shown after a prediction arrives.
pub const SUCCESS_MESSAGE: &str = "Prediction completed successfully!";

/// Shown for every remote failure; the cause goes to the log only.
pub const FAILURE_MESSAGE: &str = "Failed to get prediction. Please try again.";

/// Where a form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Pending,
    Success,
    Failed,
}

/// What `submit` did.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Request handed to the worker; phase is now Pending.
    Dispatched,
    /// A request is already in flight; nothing changed.
    AlreadyPending,
    /// Field errors were recorded; phase unchanged.
    Invalid,
}

/// One form's submission state, generic over its input schema.
pub struct SubmissionController<I, A, N>
where
    I: PredictionInput,
    A: PredictionApi + 'static,
    N: Notifier,
{
    api: Arc<A>,
    notifier: N,
    phase: SubmissionPhase,
    result: Option<PredictionResult>,
    field_errors: Vec<FieldError>,
    in_flight: Option<CallHandle<PredictionResult>>,
    submissions: u64,
    _input: PhantomData<fn() -> I>,
}

impl<I, A, N> SubmissionController<I, A, N>
where
    I: PredictionInput,
    A: PredictionApi + 'static,
    N: Notifier,
{
    pub fn new(api: Arc<A>, notifier: N) -> Self {
        Self {
            api,
            notifier,
            phase: SubmissionPhase::Idle,
            result: None,
            field_errors: Vec::new(),
            in_flight: None,
            submissions: 0,
            _input: PhantomData,
        }
    }

    #[must_use]
    pub fn disease(&self) -> Disease {
        I::DISEASE
    }

    #[must_use]
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase == SubmissionPhase::Pending
    }

    /// Result of the last successful submission, if not reset since.
    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Validation message for one field, by JSON key.
    #[must_use]
    pub fn field_error(&self, key: &str) -> Option<&FieldError> {
        self.field_errors.iter().find(|e| e.field == key)
    }

    /// Parse text entries (field order) and submit them.
    pub fn submit_raw<S: AsRef<str>>(&mut self, raw: &[S]) -> SubmitOutcome {
        if self.is_pending() {
            return self.ignore_while_pending();
        }
        match I::parse(raw) {
            Ok(input) => self.submit(input),
            Err(errors) => self.reject(errors),
        }
    }

    /// Validate and submit a typed record.
    pub fn submit(&mut self, input: I) -> SubmitOutcome {
        if self.is_pending() {
            return self.ignore_while_pending();
        }
        if let Err(errors) = input.validate() {
            return self.reject(errors);
        }

        self.field_errors.clear();
        self.submissions += 1;
        tracing::info!(
            disease = %I::DISEASE,
            submission = self.submissions,
            "Submitting prediction request"
        );

        self.in_flight = Some(CallWorker::predict(
            Arc::clone(&self.api),
            I::DISEASE,
            input,
        ));
        self.phase = SubmissionPhase::Pending;
        SubmitOutcome::Dispatched
    }

    fn ignore_while_pending(&self) -> SubmitOutcome {
        tracing::debug!(disease = %I::DISEASE, "Submit ignored: request already pending");
        SubmitOutcome::AlreadyPending
    }

    fn reject(&mut self, errors: Vec<FieldError>) -> SubmitOutcome {
        tracing::debug!(
            disease = %I::DISEASE,
            invalid_fields = errors.len(),
            "Form validation failed"
        );
        self.field_errors = errors;
        SubmitOutcome::Invalid
    }

    /// Apply the in-flight call's outcome if it has arrived.
    ///
    /// Returns `true` if the phase changed.
    pub fn poll(&mut self) -> bool {
        let Some(outcome) = self.in_flight.as_ref().and_then(CallHandle::try_recv) else {
            return false;
        };
        self.in_flight = None;
        self.resolve(outcome);
        true
    }

    /// Block until the in-flight call resolves and apply it.
    ///
    /// Returns `false` if nothing was in flight.
    pub fn wait(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) => {
                self.resolve(handle.wait());
                true
            }
            None => false,
        }
    }

    fn resolve(&mut self, outcome: Result<PredictionResult, ApiError>) {
        match outcome {
            Ok(result) => {
                tracing::info!(
                    disease = %I::DISEASE,
                    prediction = result.prediction,
                    confidence = result.confidence,
                    risk = %result.risk_level,
                    "Prediction received"
                );
                self.result = Some(result);
                self.phase = SubmissionPhase::Success;
                self.notifier.notify(Notification::success(SUCCESS_MESSAGE));
            }
            Err(err) => {
                match err.kind() {
                    FailureKind::MalformedResponse => tracing::error!(
                        disease = %I::DISEASE,
                        kind = "malformed_response",
                        error = %err,
                        "Backend response did not match the prediction contract"
                    ),
                    FailureKind::RequestFailed => tracing::error!(
                        disease = %I::DISEASE,
                        kind = "request_failed",
                        error = %err,
                        "Prediction request failed"
                    ),
                }
                // Any earlier result stays visible.
                self.phase = SubmissionPhase::Failed;
                self.notifier.notify(Notification::error(FAILURE_MESSAGE));
            }
        }
    }

    /// Return to Idle, dropping the held result, field errors and any
    /// in-flight call.
    pub fn reset(&mut self) {
        if self.in_flight.take().is_some() {
            tracing::warn!(disease = %I::DISEASE, "Abandoning in-flight prediction request");
        }
        self.phase = SubmissionPhase::Idle;
        self.result = None;
        self.field_errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::presenter::{present, Tone};
    use crate::domain::{DiabetesInput, HealthStatus, HeartDiseaseInput, RiskLevel};
    use crate::ports::NotificationLevel;
    use std::collections::VecDeque;
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::Mutex;

    /// Scripted backend: pops queued responses and records every call.
    #[derive(Default)]
    struct ScriptedApi {
        calls: Mutex<Vec<(Disease, serde_json::Value)>>,
        responses: Mutex<VecDeque<Result<PredictionResult, ApiError>>>,
        gate: Mutex<Option<Receiver<()>>>,
    }

    impl ScriptedApi {
        fn with(responses: Vec<Result<PredictionResult, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                ..Self::default()
            })
        }

        /// Hold every call open until the returned sender fires.
        fn gated(responses: Vec<Result<PredictionResult, ApiError>>) -> (Arc<Self>, Sender<()>) {
            let (tx, rx) = mpsc::channel();
            let api = Self {
                responses: Mutex::new(responses.into()),
                gate: Mutex::new(Some(rx)),
                ..Self::default()
            };
            (Arc::new(api), tx)
        }

        fn calls(&self) -> Vec<(Disease, serde_json::Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PredictionApi for ScriptedApi {
        fn base_url(&self) -> &str {
            "http://scripted/api"
        }

        fn predict(
            &self,
            disease: Disease,
            payload: &serde_json::Value,
        ) -> Result<PredictionResult, ApiError> {
            self.calls.lock().unwrap().push((disease, payload.clone()));
            if let Some(gate) = self.gate.lock().unwrap().as_ref() {
                let _ = gate.recv();
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ApiError::WorkerLost))
        }

        fn health_check(&self) -> Result<HealthStatus, ApiError> {
            Ok(HealthStatus {
                status: "healthy".into(),
                message: "ok".into(),
            })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier(Arc<Mutex<Vec<Notification>>>);

    impl RecordingNotifier {
        fn all(&self) -> Vec<Notification> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    type DiabetesForm = SubmissionController<DiabetesInput, ScriptedApi, RecordingNotifier>;

    fn ok(prediction: u8, confidence: f64, level: &str) -> Result<PredictionResult, ApiError> {
        Ok(PredictionResult {
            prediction,
            confidence,
            message: format!("{level} risk"),
            risk_level: RiskLevel::from(level.to_string()),
        })
    }

    fn server_error() -> Result<PredictionResult, ApiError> {
        Err(ApiError::Status {
            endpoint: "http://localhost:5000/api/predict/diabetes".into(),
            status: 500,
            detail: Some("Failed to make prediction".into()),
        })
    }

    const SCENARIO: [&str; 8] = ["2", "130", "80", "25", "100", "28.5", "0.5", "45"];

    #[test]
    fn test_diabetes_scenario_reaches_success() {
        let api = ScriptedApi::with(vec![ok(1, 0.91, "high")]);
        let notifier = RecordingNotifier::default();
        let mut form = DiabetesForm::new(api.clone(), notifier.clone());

        assert_eq!(form.submit_raw(&SCENARIO), SubmitOutcome::Dispatched);
        assert!(form.is_pending());
        assert!(form.wait());

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Disease::Diabetes);
        let body = calls[0].1.as_object().expect("Object body");
        let expected = [
            ("pregnancies", 2.0),
            ("glucose", 130.0),
            ("bloodPressure", 80.0),
            ("skinThickness", 25.0),
            ("insulin", 100.0),
            ("bmi", 28.5),
            ("diabetesPedigreeFunction", 0.5),
            ("age", 45.0),
        ];
        assert_eq!(body.len(), expected.len());
        for (key, value) in expected {
            assert_eq!(body[key].as_f64(), Some(value), "{key}");
        }

        assert_eq!(form.phase(), SubmissionPhase::Success);
        let result = form.result().expect("Result held");
        let view = present(form.disease(), result);
        assert_eq!(view.prediction_label, "Present");
        assert_eq!(view.prediction_tone, Tone::Danger);
        assert_eq!(view.risk_tone, Tone::Danger);
        assert_eq!(view.confidence_percent, 91);
        assert_eq!(view.risk_label, "High Risk");

        assert_eq!(notifier.all(), vec![Notification::success(SUCCESS_MESSAGE)]);
    }

    #[test]
    fn test_server_error_enters_failed() {
        let api = ScriptedApi::with(vec![server_error(), ok(0, 0.8, "low")]);
        let notifier = RecordingNotifier::default();
        let mut form = DiabetesForm::new(api.clone(), notifier.clone());

        assert_eq!(form.submit(DiabetesInput::sample()), SubmitOutcome::Dispatched);
        form.wait();

        assert_eq!(form.phase(), SubmissionPhase::Failed);
        assert!(form.result().is_none());
        let notes = notifier.all();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].message, FAILURE_MESSAGE);

        // Immediately submittable again.
        assert_eq!(form.submit(DiabetesInput::sample()), SubmitOutcome::Dispatched);
        form.wait();
        assert_eq!(form.phase(), SubmissionPhase::Success);
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let api = ScriptedApi::with(vec![ok(0, 0.7, "low"), server_error()]);
        let mut form = DiabetesForm::new(api, RecordingNotifier::default());

        let _ = form.submit(DiabetesInput::sample());
        form.wait();
        let first = form.result().cloned();

        let _ = form.submit(DiabetesInput::sample());
        form.wait();
        assert_eq!(form.phase(), SubmissionPhase::Failed);
        assert_eq!(form.result().cloned(), first);
    }

    #[test]
    fn test_malformed_response_is_a_failure() {
        let api = ScriptedApi::with(vec![Err(ApiError::MalformedResponse {
            endpoint: "predict/diabetes".into(),
            reason: "missing field `riskLevel`".into(),
        })]);
        let notifier = RecordingNotifier::default();
        let mut form = DiabetesForm::new(api, notifier.clone());

        let _ = form.submit(DiabetesInput::sample());
        form.wait();
        assert_eq!(form.phase(), SubmissionPhase::Failed);
        assert_eq!(notifier.all(), vec![Notification::error(FAILURE_MESSAGE)]);
    }

    #[test]
    fn test_new_result_replaces_old() {
        let api = ScriptedApi::with(vec![ok(1, 0.9, "high"), ok(0, 0.6, "medium")]);
        let mut form = DiabetesForm::new(api, RecordingNotifier::default());

        let _ = form.submit(DiabetesInput::sample());
        form.wait();
        let _ = form.submit(DiabetesInput::sample());
        form.wait();

        let result = form.result().expect("Result held");
        assert_eq!(result.prediction, 0);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.message, "medium risk");
    }

    #[test]
    fn test_missing_field_blocks_pending() {
        let api = ScriptedApi::with(vec![]);
        let mut form = DiabetesForm::new(api.clone(), RecordingNotifier::default());

        let mut raw = SCENARIO;
        raw[1] = "";
        assert_eq!(form.submit_raw(&raw), SubmitOutcome::Invalid);

        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(!form.wait());
        let err = form.field_error("glucose").expect("Glucose flagged");
        assert_eq!(err.message, "Glucose level is required");
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_valid_submit_clears_field_errors() {
        let api = ScriptedApi::with(vec![ok(0, 0.9, "low")]);
        let mut form = DiabetesForm::new(api, RecordingNotifier::default());

        let _ = form.submit_raw(&["x"]);
        assert_eq!(form.field_errors().len(), 8);

        let _ = form.submit_raw(&SCENARIO);
        assert!(form.field_errors().is_empty());
        form.wait();
    }

    #[test]
    fn test_out_of_domain_heart_value_rejected() {
        let api = ScriptedApi::with(vec![]);
        let mut form: SubmissionController<HeartDiseaseInput, _, _> =
            SubmissionController::new(api.clone(), RecordingNotifier::default());

        let input = HeartDiseaseInput {
            cp: 7,
            ..HeartDiseaseInput::sample()
        };
        assert_eq!(form.submit(input), SubmitOutcome::Invalid);
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(form.field_error("cp").is_some());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_second_submit_while_pending_is_ignored() {
        let (api, release) = ScriptedApi::gated(vec![ok(1, 0.91, "high"), ok(0, 0.1, "low")]);
        let notifier = RecordingNotifier::default();
        let mut form = DiabetesForm::new(api.clone(), notifier.clone());

        assert_eq!(form.submit_raw(&SCENARIO), SubmitOutcome::Dispatched);

        let other = DiabetesInput {
            glucose: 90.0,
            ..DiabetesInput::sample()
        };
        assert_eq!(form.submit(other), SubmitOutcome::AlreadyPending);
        assert_eq!(form.submit_raw(&SCENARIO), SubmitOutcome::AlreadyPending);
        assert!(!form.poll());

        release.send(()).expect("Release gate");
        form.wait();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1["glucose"].as_f64(), Some(130.0));
        assert_eq!(form.result().map(|r| r.prediction), Some(1));
        assert_eq!(notifier.all().len(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let api = ScriptedApi::with(vec![ok(0, 0.87, "low"), server_error()]);
        let mut form = DiabetesForm::new(api, RecordingNotifier::default());

        form.reset();
        assert_eq!(form.phase(), SubmissionPhase::Idle);

        let _ = form.submit(DiabetesInput::sample());
        form.wait();
        assert_eq!(form.phase(), SubmissionPhase::Success);
        form.reset();
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(form.result().is_none());

        let _ = form.submit(DiabetesInput::sample());
        form.wait();
        assert_eq!(form.phase(), SubmissionPhase::Failed);
        let _ = form.submit_raw(&[""]);
        assert!(!form.field_errors().is_empty());
        form.reset();
        form.reset();
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(form.result().is_none());
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn test_reset_abandons_in_flight_call() {
        let (api, release) = ScriptedApi::gated(vec![ok(1, 0.9, "high")]);
        let notifier = RecordingNotifier::default();
        let mut form = DiabetesForm::new(api, notifier.clone());

        let _ = form.submit(DiabetesInput::sample());
        form.reset();
        let _ = release.send(());

        assert!(!form.poll());
        assert!(!form.wait());
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(form.result().is_none());
        assert!(notifier.all().is_empty());
    }

    #[test]
    fn test_forms_are_independent() {
        let (slow, release) = ScriptedApi::gated(vec![ok(1, 0.9, "high")]);
        let fast = ScriptedApi::with(vec![ok(0, 0.8, "low")]);
        let mut diabetes = DiabetesForm::new(slow, RecordingNotifier::default());
        let mut heart: SubmissionController<HeartDiseaseInput, _, _> =
            SubmissionController::new(fast.clone(), RecordingNotifier::default());

        let _ = diabetes.submit(DiabetesInput::sample());
        assert_eq!(heart.submit(HeartDiseaseInput::sample()), SubmitOutcome::Dispatched);
        heart.wait();

        assert_eq!(heart.phase(), SubmissionPhase::Success);
        assert!(diabetes.is_pending());
        assert_eq!(fast.calls()[0].0, Disease::Heart);

        release.send(()).expect("Release gate");
        diabetes.wait();
        assert_eq!(diabetes.phase(), SubmissionPhase::Success);
    }
}
