use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use crate::app::{App, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Popups swallow keys until dismissed
    if app.popup.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_popup();
        }
        return;
    }

    if app.show_translation_picker {
        handle_translation_picker(app, key);
        return;
    }

    if handle_action_key(app, key) {
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

/// Buttons of the original window, available from both modes.
/// Returns true when the key was consumed.
fn handle_action_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::F(2) => app.view_history(),
        KeyCode::F(3) => app.save_history(),
        KeyCode::F(4) => app.toggle_theme(),
        KeyCode::F(5) => app.add_favorite(),
        KeyCode::F(6) => app.view_favorites(),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear_output(),
        KeyCode::Tab => app.cycle_translation(true),
        KeyCode::BackTab => app.cycle_translation(false),
        KeyCode::PageDown => app.scroll_half_page_down(),
        KeyCode::PageUp => app.scroll_half_page_up(),
        _ => return false,
    }
    true
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Enter => app.start_search(),

        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }

        KeyCode::Char('c') => app.clear_output(),
        KeyCode::Char('h') => app.view_history(),
        KeyCode::Char('w') => app.save_history(),
        KeyCode::Char('T') => app.toggle_theme(),
        KeyCode::Char('f') => app.add_favorite(),
        KeyCode::Char('F') => app.view_favorites(),
        KeyCode::Char('t') => app.open_translation_picker(),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.start_search(),
        KeyCode::Backspace => {
            if app.reference_cursor > 0 {
                app.reference_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.reference_input, app.reference_cursor);
                app.reference_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.reference_input.chars().count();
            if app.reference_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.reference_input, app.reference_cursor);
                app.reference_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.reference_cursor = app.reference_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.reference_input.chars().count();
            app.reference_cursor = (app.reference_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.reference_cursor = 0;
        }
        KeyCode::End => {
            app.reference_cursor = app.reference_input.chars().count();
        }
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }
        // Other chords are not text
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.reference_input, app.reference_cursor);
            app.reference_input.insert(byte_pos, c);
            app.reference_cursor += 1;
        }
        _ => {}
    }
}

fn handle_translation_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.show_translation_picker = false,
        KeyCode::Char('j') | KeyCode::Down => app.translation_picker_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.translation_picker_nav_up(),
        KeyCode::Enter => app.confirm_translation_picker(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_down(),
        MouseEventKind::ScrollUp => app.scroll_up(),
        _ => {}
    }
}
