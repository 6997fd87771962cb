//! UI module: View components for the TUI.

pub mod dashboard;
pub mod form;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ports::Notification;
use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: For educational and research purposes only. Predictions are not a substitute for professional medical advice, diagnosis, or treatment.",
            MedicalTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Always consult qualified healthcare professionals for medical decisions.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

const TOAST_WIDTH: u16 = 48;

/// Draw live toasts stacked in the top-right corner, newest last.
pub fn render_toasts(f: &mut Frame, area: Rect, toasts: &[Notification]) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);

    for (i, toast) in toasts.iter().enumerate() {
        let y = area.y + 1 + (i as u16) * 3;
        if y + 3 > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, 3);
        let style = MedicalTheme::toast(toast.level);

        let p = Paragraph::new(Line::from(Span::styled(toast.message.as_str(), style)))
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(style));

        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}
