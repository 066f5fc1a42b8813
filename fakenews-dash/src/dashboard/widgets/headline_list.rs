use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::dashboard::app::{App, Focus};
use crate::dashboard::theme::Theme;
use crate::models::{NewsSource, RequestStatus};

pub fn draw_headline_list(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state = app.state();
    let focused = app.focus == Focus::Headlines;

    let mut title = format!(" Headlines ({}) ", state.headlines.len());
    if let Some(at) = state.last_refreshed {
        title.push_str(&format!("- refreshed {} ", at.format("%H:%M:%S")));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .style(theme.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)].as_ref())
        .split(inner);

    draw_source_selector(f, chunks[0], app, theme);

    if state.headlines.is_empty() {
        let message = match &state.headlines_status {
            RequestStatus::Pending => "Loading headlines...",
            RequestStatus::Failed(_) => "No headlines loaded.",
            _ => "No headlines.",
        };
        f.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(theme.muted))),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = state
        .headlines
        .iter()
        .enumerate()
        .map(|(i, headline)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(theme.muted)),
                Span::raw(headline.as_str()),
            ]))
        })
        .collect();

    let highlight = if focused {
        Style::default()
            .fg(theme.background)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let list = List::new(items)
        .highlight_style(highlight)
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn draw_source_selector(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state = app.state();
    let mut spans = vec![Span::raw("Select News Source: ")];

    for source in NewsSource::ALL {
        let style = if source == state.source {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!(" {} ", source.display_name()), style));
        spans.push(Span::raw(" "));
    }

    match &state.headlines_status {
        RequestStatus::Pending => spans.push(Span::styled(
            "refreshing...",
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        )),
        RequestStatus::Failed(msg) => spans.push(Span::styled(
            format!("Error: {msg}"),
            Style::default().fg(theme.error),
        )),
        RequestStatus::Idle | RequestStatus::Succeeded => {}
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
