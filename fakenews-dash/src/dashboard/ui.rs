use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::App;
use super::theme::Theme;
use super::widgets::{
    headline_list::draw_headline_list, input_box::draw_input_box,
    prediction_panel::draw_prediction_panel,
};
use crate::models::DisplayMode;

pub fn draw(f: &mut Frame, app: &App) {
    let theme = Theme::for_mode(app.state().display_mode);
    f.render_widget(Block::default().style(theme.base()), f.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Header
                Constraint::Length(3), // Input
                Constraint::Length(5), // Prediction
                Constraint::Min(6),    // Headlines
                Constraint::Length(2), // Help
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_header(f, chunks[0], app, &theme);
    draw_input_box(f, chunks[1], app, &theme);
    draw_prediction_panel(f, chunks[2], app, &theme);
    draw_headline_list(f, chunks[3], app, &theme);
    draw_help(f, chunks[4], &theme);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let toggle_label = match app.state().display_mode {
        DisplayMode::Light => "Dark Mode",
        DisplayMode::Dark => "Light Mode",
    };

    let header_text = vec![
        Span::raw("Source: "),
        Span::styled(
            app.state().source.display_name(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled("d", Style::default().fg(theme.key).add_modifier(Modifier::BOLD)),
        Span::raw(format!(": {toggle_label}")),
    ];

    let header = Paragraph::new(Line::from(header_text))
        .style(theme.base())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Fake News Detector Dashboard ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(theme.border(true)),
        );

    f.render_widget(header, area);
}

fn draw_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let key = Style::default().fg(theme.key).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Span::styled("Tab", key),
        Span::raw(" focus  "),
        Span::styled("Enter", key),
        Span::raw(" analyze  "),
        Span::styled("s/←→", key),
        Span::raw(" source  "),
        Span::styled("r", key),
        Span::raw(" refresh  "),
        Span::styled("↑↓", key),
        Span::raw(" select  "),
        Span::styled("d", key),
        Span::raw(" theme  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ];

    let help = Paragraph::new(Line::from(help_text))
        .style(Style::default().fg(theme.muted).bg(theme.background))
        .block(Block::default().borders(Borders::TOP).border_style(theme.border(false)))
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}
