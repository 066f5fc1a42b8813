use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::dashboard::app::{App, Focus};
use crate::dashboard::theme::Theme;

const PLACEHOLDER: &str = "Enter news headline or article...";

pub fn draw_input_box(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Input;
    let text = app.state().input_text.as_str();
    let inner_width = area.width.saturating_sub(2) as usize;

    // Leave one cell for the cursor.
    let visible = visible_tail(text, inner_width.saturating_sub(1));

    let line = if text.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::raw(visible))
    };

    let title = if app.state().prediction_status.is_pending() {
        " Analyze [working...] "
    } else {
        " Analyze (Enter) "
    };

    let input = Paragraph::new(line).style(theme.base()).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.border(focused)),
    );
    f.render_widget(input, area);

    if focused {
        let x = area.x + 1 + visible.width() as u16;
        f.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
    }
}

/// Longest suffix of `text` that fits in `width` terminal cells.
fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}
