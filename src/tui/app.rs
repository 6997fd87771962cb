//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - One submission controller per disease form
//! - Backend health probing via background worker

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::{HttpPredictionClient, ToastQueue};
use crate::application::{
    present, CallHandle, CallWorker, RiskPresentation, SubmissionController, SubmissionPhase,
    SubmitOutcome,
};
use crate::config::Config;
use crate::domain::{
    DiabetesInput, Disease, FieldError, HealthStatus, HeartDiseaseInput, ParkinsonsInput,
    PredictionInput,
};
use crate::ports::{ApiError, Notifier, PredictionApi};

use super::ui::{
    dashboard::{render_dashboard, BackendHealth, DashboardState},
    form::{render_form, FormState, FormView},
    render_disclaimer, render_toasts,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Form(Disease),
}

/// What the UI needs from a form's controller, independent of its schema.
trait FormSlot {
    fn phase(&self) -> SubmissionPhase;
    fn field_errors(&self) -> &[FieldError];
    fn presentation(&self) -> Option<RiskPresentation>;
    fn submit_raw(&mut self, raw: &[&str]) -> SubmitOutcome;
    fn poll(&mut self) -> bool;
    fn reset(&mut self);
}

impl<I, A, N> FormSlot for SubmissionController<I, A, N>
where
    I: PredictionInput,
    A: PredictionApi + 'static,
    N: Notifier,
{
    fn phase(&self) -> SubmissionPhase {
        SubmissionController::phase(self)
    }

    fn field_errors(&self) -> &[FieldError] {
        SubmissionController::field_errors(self)
    }

    fn presentation(&self) -> Option<RiskPresentation> {
        self.result().map(|r| present(self.disease(), r))
    }

    fn submit_raw(&mut self, raw: &[&str]) -> SubmitOutcome {
        SubmissionController::submit_raw(self, raw)
    }

    fn poll(&mut self) -> bool {
        SubmissionController::poll(self)
    }

    fn reset(&mut self) {
        SubmissionController::reset(self);
    }
}

/// Main application state
pub struct App<A: PredictionApi + 'static = HttpPredictionClient> {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    api: Arc<A>,

    /// Shared notification sink, rendered as an overlay
    toasts: ToastQueue,

    /// Controllers in `Disease::ALL` order
    forms: Vec<Box<dyn FormSlot>>,

    /// Buffers of the open form (if any)
    form_state: Option<FormState>,

    dashboard_state: DashboardState,

    /// Pending health probe (if running)
    health_call: Option<CallHandle<HealthStatus>>,
}

impl App<HttpPredictionClient> {
    /// Create a new application instance talking to the configured backend.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let api = Arc::new(HttpPredictionClient::new(&config.api));
        Self::with_dependencies(api, ToastQueue::new())
    }
}

impl<A: PredictionApi + 'static> App<A> {
    /// Create application with injected dependencies (Composition Root pattern).
    pub fn with_dependencies(api: Arc<A>, toasts: ToastQueue) -> Self {
        let forms: Vec<Box<dyn FormSlot>> = Disease::ALL
            .iter()
            .map(|disease| Self::controller_for(*disease, &api, &toasts))
            .collect();

        let api_url = api.base_url().to_string();

        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            api,
            toasts,
            forms,
            form_state: None,
            dashboard_state: DashboardState {
                api_url,
                health: BackendHealth::default(),
                checked_at: None,
            },
            health_call: None,
        }
    }

    fn controller_for(disease: Disease, api: &Arc<A>, toasts: &ToastQueue) -> Box<dyn FormSlot> {
        let api = Arc::clone(api);
        let toasts = toasts.clone();
        match disease {
            Disease::Diabetes => Box::new(SubmissionController::<DiabetesInput, _, _>::new(api, toasts)),
            Disease::Heart => {
                Box::new(SubmissionController::<HeartDiseaseInput, _, _>::new(api, toasts))
            }
            Disease::Parkinsons => {
                Box::new(SubmissionController::<ParkinsonsInput, _, _>::new(api, toasts))
            }
        }
    }

    fn slot(disease: Disease) -> usize {
        match disease {
            Disease::Diabetes => 0,
            Disease::Heart => 1,
            Disease::Parkinsons => 2,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.check_health();

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.tick();

            terminal.draw(|f| self.draw(f))?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply any finished background calls.
    pub fn tick(&mut self) {
        for form in self.forms.iter_mut() {
            form.poll();
        }
        self.poll_health();
    }

    fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let content_area = chunks[0];
        let disclaimer_area = chunks[1];

        match (self.screen, &self.form_state) {
            (Screen::Form(disease), Some(state)) => {
                let form = &self.forms[Self::slot(disease)];
                let view = FormView {
                    phase: form.phase(),
                    errors: form.field_errors(),
                    result: form.presentation(),
                };
                render_form(f, content_area, state, &view);
            }
            _ => render_dashboard(f, content_area, &self.dashboard_state),
        }

        render_disclaimer(f, disclaimer_area);
        render_toasts(f, area, &self.toasts.active());
    }

    /// Start a health probe unless one is already running.
    pub fn check_health(&mut self) {
        if self.health_call.is_some() {
            return;
        }
        self.dashboard_state.health = BackendHealth::Checking;
        self.health_call = Some(CallWorker::health_check(Arc::clone(&self.api)));
    }

    fn poll_health(&mut self) {
        let Some(outcome) = self.health_call.as_ref().and_then(CallHandle::try_recv) else {
            return;
        };
        self.health_call = None;
        self.apply_health(outcome);
    }

    fn apply_health(&mut self, outcome: std::result::Result<HealthStatus, ApiError>) {
        self.dashboard_state.health = match outcome {
            Ok(status) => {
                tracing::info!(status = %status.status, "Backend health check succeeded");
                BackendHealth::Online(status)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed");
                BackendHealth::Offline
            }
        };
        self.dashboard_state.checked_at = Some(chrono::Local::now());
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Form(disease) => self.handle_form_key(disease, key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('1') => self.open_form(Disease::Diabetes),
            KeyCode::Char('2') => self.open_form(Disease::Heart),
            KeyCode::Char('3') => self.open_form(Disease::Parkinsons),
            KeyCode::Char('h') | KeyCode::Char('H') => self.check_health(),
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn open_form(&mut self, disease: Disease) {
        self.form_state = Some(FormState::new(disease));
        self.screen = Screen::Form(disease);
    }

    /// Leave the form as an unmount would: drop its buffers, result and any
    /// in-flight call.
    fn close_form(&mut self, disease: Disease) {
        self.forms[Self::slot(disease)].reset();
        if let Some(mut state) = self.form_state.take() {
            state.clear_sensitive();
        }
        self.screen = Screen::Dashboard;
    }

    fn handle_form_key(&mut self, disease: Disease, key: KeyCode) {
        if key == KeyCode::Esc {
            self.close_form(disease);
            return;
        }

        let slot = Self::slot(disease);
        let Some(state) = self.form_state.as_mut() else {
            self.screen = Screen::Dashboard;
            return;
        };

        match key {
            KeyCode::Up => state.prev_field(),
            KeyCode::Down | KeyCode::Tab => state.next_field(),
            KeyCode::Char('s') | KeyCode::Char('S') => state.load_sample_data(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.forms[slot].reset();
                state.clear_sensitive();
            }
            KeyCode::Char(c) => state.input_char(c),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Delete => state.clear_field(),
            KeyCode::Enter => {
                let raw = state.values();
                let _ = self.forms[slot].submit_raw(&raw);
            }
            _ => {}
        }
    }

    #[cfg(test)]
    fn phase_of(&self, disease: Disease) -> SubmissionPhase {
        self.forms[Self::slot(disease)].phase()
    }

    #[cfg(test)]
    fn form_values(&self) -> Vec<String> {
        self.form_state
            .as_ref()
            .map(|s| s.values().iter().map(|v| v.to_string()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PredictionResult, RiskLevel};
    use crate::ports::NotificationLevel;
    use ratatui::backend::TestBackend;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Default)]
    struct FixedApi {
        calls: Mutex<usize>,
    }

    impl PredictionApi for FixedApi {
        fn base_url(&self) -> &str {
            "http://test/api"
        }

        fn predict(
            &self,
            _disease: Disease,
            _payload: &serde_json::Value,
        ) -> std::result::Result<PredictionResult, ApiError> {
            *self.calls.lock().unwrap() += 1;
            Ok(PredictionResult {
                prediction: 0,
                confidence: 0.87,
                message: "Low risk".into(),
                risk_level: RiskLevel::Low,
            })
        }

        fn health_check(&self) -> std::result::Result<HealthStatus, ApiError> {
            Ok(HealthStatus {
                status: "healthy".into(),
                message: "API is running".into(),
            })
        }
    }

    fn app() -> (App<FixedApi>, Arc<FixedApi>, ToastQueue) {
        let api = Arc::new(FixedApi::default());
        let toasts = ToastQueue::new();
        (App::with_dependencies(Arc::clone(&api), toasts.clone()), api, toasts)
    }

    fn press(app: &mut App<FixedApi>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn settle(app: &mut App<FixedApi>, disease: Disease) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.phase_of(disease) == SubmissionPhase::Pending && Instant::now() < deadline {
            app.tick();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_dashboard_navigation_and_quit() {
        let (mut app, _, _) = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.screen(), Screen::Form(Disease::Heart));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Dashboard);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_q_quits_from_form() {
        let (mut app, _, _) = app();
        press(&mut app, KeyCode::Char('1'));
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }

    #[test]
    fn test_sample_submit_reaches_success() {
        let (mut app, api, toasts) = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app, Disease::Diabetes);

        assert_eq!(app.phase_of(Disease::Diabetes), SubmissionPhase::Success);
        assert_eq!(*api.calls.lock().unwrap(), 1);
        let active = toasts.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].level, NotificationLevel::Success);
    }

    #[test]
    fn test_incomplete_form_does_not_submit() {
        let (mut app, api, toasts) = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.phase_of(Disease::Parkinsons), SubmissionPhase::Idle);
        assert_eq!(*api.calls.lock().unwrap(), 0);
        assert!(toasts.active().is_empty());
    }

    #[test]
    fn test_leaving_form_clears_it() {
        let (mut app, _, _) = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app, Disease::Diabetes);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.phase_of(Disease::Diabetes), SubmissionPhase::Idle);

        press(&mut app, KeyCode::Char('1'));
        assert!(app.form_values().iter().all(String::is_empty));
    }

    #[test]
    fn test_reset_key_clears_result_and_fields() {
        let (mut app, _, _) = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app, Disease::Heart);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.phase_of(Disease::Heart), SubmissionPhase::Idle);
        assert!(app.form_values().iter().all(String::is_empty));
        assert_eq!(app.screen(), Screen::Form(Disease::Heart));
    }

    #[test]
    fn test_health_probe_updates_dashboard() {
        let (mut app, _, _) = app();
        app.check_health();
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.health_call.is_some() && Instant::now() < deadline {
            app.tick();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(matches!(
            app.dashboard_state.health,
            BackendHealth::Online(ref s) if s.status == "healthy"
        ));
        assert!(app.dashboard_state.checked_at.is_some());
    }

    #[test]
    fn test_draws_every_screen() {
        let (mut app, _, _) = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("Terminal");

        terminal.draw(|f| app.draw(f)).expect("Draw dashboard");
        for key in ['1', '2', '3'] {
            press(&mut app, KeyCode::Char(key));
            press(&mut app, KeyCode::Char('s'));
            terminal.draw(|f| app.draw(f)).expect("Draw form");
            press(&mut app, KeyCode::Esc);
        }
    }
}
