use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Load meals for the date in the input field
    Search,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Enter, Esc};

    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // Any key acknowledges the notice, like closing a dialog.
    if app.notice.is_some() {
        app.notice = None;
        return Action::None;
    }

    match key.code {
        Esc => Action::Quit,
        Enter => Action::Search,
        Backspace => {
            app.date_input.pop();
            Action::None
        }
        Char(character)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            app.push_date_char(character);
            Action::None
        }
        _ => Action::None,
    }
}
