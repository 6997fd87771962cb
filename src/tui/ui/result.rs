//! Result card: one prediction as the user sees it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::RiskPresentation;
use crate::tui::styles::MedicalTheme;

/// Render the "Prediction Results" card.
pub fn render_result(f: &mut Frame, area: Rect, view: &RiskPresentation) {
    let block = Block::default()
        .title(Span::styled(" Prediction Results ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Risk level + message
            Constraint::Length(3), // Confidence
            Constraint::Length(5), // Details
            Constraint::Min(0),    // Recommendations
        ])
        .margin(1)
        .split(inner);

    render_risk(f, chunks[0], view);
    render_confidence(f, chunks[1], view);
    render_details(f, chunks[2], view);
    render_recommendations(f, chunks[3], view);
}

fn render_risk(f: &mut Frame, area: Rect, view: &RiskPresentation) {
    let style = MedicalTheme::tone(view.risk_tone);

    let risk = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} {}", view.icon.glyph(), view.risk_label),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(view.message.as_str(), MedicalTheme::text())),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::LEFT).border_style(style));

    f.render_widget(risk, area);
}

fn render_confidence(f: &mut Frame, area: Rect, view: &RiskPresentation) {
    // The bar saturates; the label keeps the raw percentage.
    let ratio = if view.confidence_ratio.is_finite() {
        view.confidence_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Confidence Score ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(Style::default().fg(MedicalTheme::accent(view.accent)))
        .ratio(ratio)
        .label(format!("{}%", view.confidence_percent));

    f.render_widget(gauge, area);
}

fn render_details(f: &mut Frame, area: Rect, view: &RiskPresentation) {
    let details = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Disease:     ", MedicalTheme::text_secondary()),
            Span::styled(view.disease_name, MedicalTheme::title()),
        ]),
        Line::from(vec![
            Span::styled("Prediction:  ", MedicalTheme::text_secondary()),
            Span::styled(
                view.prediction_label,
                MedicalTheme::tone(view.prediction_tone).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Risk Level:  ", MedicalTheme::text_secondary()),
            Span::styled(
                view.risk_level.as_str(),
                MedicalTheme::tone(view.risk_tone).add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Prediction Details ", MedicalTheme::text_secondary()))
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(details, area);
}

fn render_recommendations(f: &mut Frame, area: Rect, view: &RiskPresentation) {
    let lines: Vec<Line> = view
        .recommendations
        .iter()
        .map(|r| Line::from(Span::styled(format!("• {r}"), MedicalTheme::text())))
        .collect();

    let recommendations = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .title(Span::styled(" Recommendations ", MedicalTheme::text_secondary()))
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(recommendations, area);
}
