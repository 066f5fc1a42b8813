use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::dashboard::app::App;
use crate::dashboard::theme::Theme;
use crate::models::RequestStatus;

pub fn draw_prediction_panel(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state = app.state();

    let mut lines = match &state.prediction {
        Some(prediction) => vec![
            Line::from(Span::styled(
                prediction.prediction.clone(),
                Style::default()
                    .fg(theme.label_color(&prediction.prediction))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Confidence: {}", prediction.confidence)),
        ],
        None => vec![Line::from(Span::styled(
            "No prediction yet",
            Style::default().fg(theme.muted),
        ))],
    };

    match &state.prediction_status {
        RequestStatus::Pending => lines.push(Line::from(Span::styled(
            "Analyzing...",
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        ))),
        RequestStatus::Failed(msg) => lines.push(Line::from(Span::styled(
            format!("Error: {msg}"),
            Style::default().fg(theme.error),
        ))),
        RequestStatus::Idle | RequestStatus::Succeeded => {}
    }

    let panel = Paragraph::new(lines)
        .style(theme.base())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Prediction ")
                .borders(Borders::ALL)
                .border_style(theme.border(false)),
        )
        .alignment(Alignment::Left);

    f.render_widget(panel, area);
}
