// Event Handling
// Application event types and handler infrastructure

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Which part of the screen receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigating the category board
    Board,
    /// Typing into the "Add Widget" side panel
    Drawer,
    /// Answering the delete confirmation dialog
    Confirm,
}

/// Application events that can be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Quit the application
    Quit,

    /// Move focus
    Up,
    Down,
    Left,
    Right,

    /// Move to the next / previous form field
    NextField,
    PreviousField,

    /// Activate the focused item or submit the form
    Submit,

    /// Close the drawer or dialog
    Back,

    /// Open the "Add Widget" side panel
    OpenDrawer,

    /// Ask to delete the focused widget
    RequestDelete,

    /// Reload categories from the server
    Refresh,

    /// Text input
    Input(char),
    Backspace,

    /// No operation
    None,
}

/// Event handler that converts terminal events to application events
pub struct EventHandler;

impl EventHandler {
    /// Convert a crossterm event to an application event
    pub fn handle(event: Event, mode: InputMode) -> AppEvent {
        match event {
            Event::Key(key) => Self::handle_key(key, mode),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, mode),
            _ => AppEvent::None,
        }
    }

    fn handle_key(key: KeyEvent, mode: InputMode) -> AppEvent {
        // Only handle key press events
        if key.kind != KeyEventKind::Press {
            return AppEvent::None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppEvent::Quit;
        }

        match mode {
            InputMode::Board => Self::board_key(key),
            InputMode::Drawer => Self::drawer_key(key),
            InputMode::Confirm => Self::confirm_key(key),
        }
    }

    fn board_key(key: KeyEvent) -> AppEvent {
        match key.code {
            KeyCode::Char('q') => AppEvent::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => AppEvent::Up,
            KeyCode::Down | KeyCode::Char('j') => AppEvent::Down,
            KeyCode::Left | KeyCode::Char('h') => AppEvent::Left,
            KeyCode::Right | KeyCode::Char('l') => AppEvent::Right,

            KeyCode::Enter | KeyCode::Char(' ') => AppEvent::Submit,
            KeyCode::Char('a') => AppEvent::OpenDrawer,
            KeyCode::Char('d') | KeyCode::Delete => AppEvent::RequestDelete,
            KeyCode::Char('r') => AppEvent::Refresh,
            KeyCode::Esc => AppEvent::Back,

            _ => AppEvent::None,
        }
    }

    fn drawer_key(key: KeyEvent) -> AppEvent {
        match key.code {
            KeyCode::Esc => AppEvent::Back,
            KeyCode::Enter => AppEvent::Submit,
            KeyCode::Tab | KeyCode::Down => AppEvent::NextField,
            KeyCode::BackTab | KeyCode::Up => AppEvent::PreviousField,
            KeyCode::Left => AppEvent::Left,
            KeyCode::Right => AppEvent::Right,
            KeyCode::Backspace => AppEvent::Backspace,
            KeyCode::Char(c) => AppEvent::Input(c),
            _ => AppEvent::None,
        }
    }

    fn confirm_key(key: KeyEvent) -> AppEvent {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => AppEvent::Back,
            KeyCode::Enter => AppEvent::Submit,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => AppEvent::Left,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => AppEvent::Right,
            _ => AppEvent::None,
        }
    }

    /// Mouse wheel scrolls the board
    fn handle_mouse(mouse: MouseEvent, mode: InputMode) -> AppEvent {
        if mode != InputMode::Board {
            return AppEvent::None;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => AppEvent::Up,
            MouseEventKind::ScrollDown => AppEvent::Down,
            _ => AppEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_q_quits_on_board_but_types_in_drawer() {
        assert_eq!(EventHandler::handle(press(KeyCode::Char('q')), InputMode::Board), AppEvent::Quit);
        assert_eq!(
            EventHandler::handle(press(KeyCode::Char('q')), InputMode::Drawer),
            AppEvent::Input('q')
        );
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        for mode in [InputMode::Board, InputMode::Drawer, InputMode::Confirm] {
            assert_eq!(EventHandler::handle(ctrl_c.clone(), mode), AppEvent::Quit);
        }
    }

    #[test]
    fn test_board_shortcuts() {
        assert_eq!(EventHandler::handle(press(KeyCode::Char('a')), InputMode::Board), AppEvent::OpenDrawer);
        assert_eq!(EventHandler::handle(press(KeyCode::Delete), InputMode::Board), AppEvent::RequestDelete);
        assert_eq!(EventHandler::handle(press(KeyCode::Char('r')), InputMode::Board), AppEvent::Refresh);
    }

    #[test]
    fn test_confirm_ignores_typing() {
        assert_eq!(EventHandler::handle(press(KeyCode::Char('x')), InputMode::Confirm), AppEvent::None);
        assert_eq!(EventHandler::handle(press(KeyCode::Esc), InputMode::Confirm), AppEvent::Back);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(EventHandler::handle(Event::Key(key), InputMode::Board), AppEvent::None);
    }
}
