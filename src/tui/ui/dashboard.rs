//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use chrono::{DateTime, Local};

use crate::domain::{Disease, HealthStatus};
use crate::tui::styles::MedicalTheme;

/// Last known backend health.
#[derive(Debug, Clone, Default)]
pub enum BackendHealth {
    #[default]
    Checking,
    Online(HealthStatus),
    Offline,
}

/// Dashboard state for rendering.
pub struct DashboardState {
    pub api_url: String,
    pub health: BackendHealth,
    /// When the last probe finished
    pub checked_at: Option<DateTime<Local>>,
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    // Split into header and main content
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_main_content(f, chunks[1], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("MediPredict", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Machine-learning disease risk prediction", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState) {
    // Left: backend status, right: available predictions
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_status_panel(f, chunks[0], state);
    render_disease_menu(f, chunks[1]);
}

fn render_status_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Backend status
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let (indicator, style, detail) = match &state.health {
        BackendHealth::Checking => ("…", MedicalTheme::warning(), "Checking backend...".to_string()),
        BackendHealth::Online(status) => ("●", MedicalTheme::success(), status.message.clone()),
        BackendHealth::Offline => ("○", MedicalTheme::danger(), "Backend unreachable".to_string()),
    };

    let checked = state
        .checked_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let status = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{indicator} "), style),
            Span::styled(detail, style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("API: ", MedicalTheme::text_secondary()),
            Span::styled(state.api_url.as_str(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Last checked: ", MedicalTheme::text_secondary()),
            Span::styled(checked, MedicalTheme::text()),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Backend Status ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(status, chunks[0]);

    let actions = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("[1-3] ", MedicalTheme::key_hint()),
            Span::styled("Open prediction form", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[H]   ", MedicalTheme::key_hint()),
            Span::styled("Check backend health", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q]   ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(actions, chunks[1]);
}

fn render_disease_menu(f: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for (i, disease) in Disease::ALL.iter().enumerate() {
        let accent = MedicalTheme::accent(disease.accent());
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", i + 1), MedicalTheme::key_hint()),
            Span::styled(
                format!("{} Prediction", disease.display_name()),
                MedicalTheme::title().fg(accent),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", disease.tagline()),
            MedicalTheme::text_secondary(),
        )));
        lines.push(Line::from(""));
    }

    let menu = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Predictions ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );

    f.render_widget(menu, area.inner(ratatui::layout::Margin::new(1, 1)));
}
