use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.quit(),
            KeyCode::Char('d') => app.controller.toggle_display_mode(),
            _ => {}
        }
        return;
    }

    if key.code == KeyCode::Tab {
        app.cycle_focus();
        return;
    }

    match app.focus {
        Focus::Input => handle_input_key(key, app),
        Focus::Headlines => handle_headlines_key(key, app),
    }
}

fn handle_input_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => app.controller.analyze_input(),
        KeyCode::Backspace => app.controller.pop_input_char(),
        KeyCode::Esc => app.focus = Focus::Headlines,
        KeyCode::Char(c) => app.controller.push_input_char(c),
        _ => {}
    }
}

fn handle_headlines_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('d') => app.controller.toggle_display_mode(),
        KeyCode::Char('s') | KeyCode::Right => app.next_source(),
        KeyCode::Left => app.previous_source(),
        KeyCode::Char('r') => app.controller.refresh_headlines(),
        KeyCode::Up | KeyCode::Char('k') => app.select_up(),
        KeyCode::Down | KeyCode::Char('j') => app.select_down(),
        KeyCode::Enter | KeyCode::Char('a') => app.analyze_selected(),
        KeyCode::Char('i') => app.focus = Focus::Input,
        _ => {}
    }
}
