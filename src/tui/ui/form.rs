//! Prediction form: field entry plus the result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::application::{RiskPresentation, SubmissionPhase};
use crate::domain::{fields_for, sample_values, Disease, FieldError, FieldSpec};
use crate::tui::styles::MedicalTheme;

use super::result::render_result;

/// One text input bound to a field of the schema.
#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: &'static FieldSpec,
    pub value: String,
}

/// Editable form buffers for one disease.
pub struct FormState {
    pub disease: Disease,
    pub fields: Vec<FormField>,
    pub selected_field: usize,
}

impl FormState {
    #[must_use]
    pub fn new(disease: Disease) -> Self {
        Self {
            disease,
            fields: fields_for(disease)
                .iter()
                .map(|spec| FormField {
                    spec,
                    value: String::new(),
                })
                .collect(),
            selected_field: 0,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            self.fields[self.selected_field].value.push(c);
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Wipe all field buffers and return to the first field.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        self.selected_field = 0;
    }

    /// Fill every field with the reference sample.
    pub fn load_sample_data(&mut self) {
        for (field, value) in self.fields.iter_mut().zip(sample_values(self.disease)) {
            field.value = value.to_string();
        }
    }

    /// Raw entries in field order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.value.as_str()).collect()
    }
}

/// Controller state the form screen displays.
pub struct FormView<'a> {
    pub phase: SubmissionPhase,
    pub errors: &'a [FieldError],
    pub result: Option<RiskPresentation>,
}

/// Render a prediction form with its result panel
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState, view: &FormView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + result
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_form_header(f, chunks[0], state.disease);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_form_fields(f, body[0], state, view.errors);
    render_result_panel(f, body[1], view);
    render_form_footer(f, chunks[2], view);
}

fn render_form_header(f: &mut Frame, area: Rect, disease: Disease) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(
            format!("{} Prediction", disease.display_name()),
            MedicalTheme::title().fg(MedicalTheme::accent(disease.accent())),
        ),
        Span::styled(format!(" │ {}", disease.tagline()), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn field_lines<'a>(
    state: &'a FormState,
    errors: &'a [FieldError],
    label_width: usize,
) -> (Vec<Line<'a>>, usize) {
    let mut lines = Vec::with_capacity(state.fields.len() + errors.len());
    let mut selected_line = 0;

    for (i, field) in state.fields.iter().enumerate() {
        let is_selected = i == state.selected_field;
        if is_selected {
            selected_line = lines.len();
        }

        let (marker, label_style) = if is_selected {
            ("▸ ", MedicalTheme::focused())
        } else {
            ("  ", MedicalTheme::text_secondary())
        };

        let value = if field.value.is_empty() && !is_selected {
            Span::styled(field.spec.hint, MedicalTheme::text_muted())
        } else {
            Span::styled(field.value.as_str(), MedicalTheme::text())
        };

        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(
                format!("{:<width$} ", field.spec.label, width = label_width),
                label_style,
            ),
            value,
        ];
        if is_selected {
            spans.push(Span::styled("▌", MedicalTheme::cursor()));
            if field.value.is_empty() {
                spans.push(Span::styled(format!(" {}", field.spec.hint), MedicalTheme::text_muted()));
            }
        }
        lines.push(Line::from(spans));

        if let Some(err) = errors.iter().find(|e| e.field == field.spec.key) {
            lines.push(Line::from(Span::styled(
                format!("    ! {}", err.message),
                MedicalTheme::danger(),
            )));
        }
    }

    // Errors not tied to a single field (record-level).
    for err in errors.iter().filter(|e| e.field.is_empty()) {
        lines.push(Line::from(Span::styled(format!("! {err}"), MedicalTheme::danger())));
    }

    (lines, selected_line)
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState, errors: &[FieldError]) {
    let block = Block::default()
        .title(Span::styled(" Input Parameters ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(area);

    let label_width = state
        .fields
        .iter()
        .map(|f| f.spec.label.chars().count())
        .max()
        .unwrap_or(0);
    let (lines, selected_line) = field_lines(state, errors, label_width);

    // Keep the selected field (and its error line) in view.
    let visible = inner.height as usize;
    let offset = (selected_line + 2).saturating_sub(visible);

    let content = Paragraph::new(lines)
        .block(block)
        .scroll((offset as u16, 0));

    f.render_widget(content, area);
}

fn render_result_panel(f: &mut Frame, area: Rect, view: &FormView<'_>) {
    if let Some(result) = &view.result {
        render_result(f, area, result);
        return;
    }

    let (headline, style) = match view.phase {
        SubmissionPhase::Pending => ("Predicting...", MedicalTheme::focused()),
        SubmissionPhase::Failed => ("Prediction failed", MedicalTheme::danger()),
        SubmissionPhase::Idle | SubmissionPhase::Success => {
            ("No prediction yet", MedicalTheme::text_secondary())
        }
    };

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(headline, style)),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in every field and press Enter",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Prediction Results ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, view: &FormView<'_>) {
    let mut spans = vec![
        Span::styled("[↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
    ];
    if view.phase == SubmissionPhase::Pending {
        spans.push(Span::styled("Predicting... ", MedicalTheme::focused()));
    } else {
        spans.push(Span::styled("[Enter] ", MedicalTheme::key_hint()));
        spans.push(Span::styled("Predict ", MedicalTheme::key_desc()));
    }
    spans.extend([
        Span::styled("[S] ", MedicalTheme::key_hint()),
        Span::styled("Sample Data ", MedicalTheme::key_desc()),
        Span::styled("[R] ", MedicalTheme::key_hint()),
        Span::styled("Reset ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Back", MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_keys() {
        let mut form = FormState::new(Disease::Diabetes);
        form.input_char('1');
        form.input_char('x');
        form.input_char('.');
        form.input_char('5');
        assert_eq!(form.fields[0].value, "1.5");

        form.delete_char();
        assert_eq!(form.fields[0].value, "1.");

        form.prev_field();
        assert_eq!(form.selected_field, 7);
        form.next_field();
        assert_eq!(form.selected_field, 0);

        form.clear_field();
        assert!(form.fields[0].value.is_empty());
    }

    #[test]
    fn test_sample_data_fills_every_field() {
        let mut form = FormState::new(Disease::Parkinsons);
        form.load_sample_data();
        assert_eq!(form.fields.len(), 22);
        assert!(form.values().iter().all(|v| !v.is_empty()));
        assert!(form.values().contains(&"-4.813031"));
    }

    #[test]
    fn test_clear_sensitive_wipes_buffers() {
        let mut form = FormState::new(Disease::Heart);
        form.load_sample_data();
        form.next_field();
        form.clear_sensitive();
        assert_eq!(form.selected_field, 0);
        assert!(form.values().iter().all(|v| v.is_empty()));
    }
}
