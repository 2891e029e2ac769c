//! Event handling utilities

use crossterm::event::KeyCode;

/// Actions that can be taken in the app. Meaning is contextual: `Select`
/// picks a language, toggles a composer topic, or records an MCQ answer
/// depending on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,

    // Selection
    Select,
    Back,

    // Quiz
    Submit,
    JumpTo(usize),
    InsertMode,

    // Dashboard
    MarkTutorial,
    OpenCustomQuiz,
    Refresh,

    Quit,
}

/// Vim-style key mapping
pub fn key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('s') => Some(Action::Submit),
        KeyCode::Char('i') => Some(Action::InsertMode),
        KeyCode::Char('m') => Some(Action::MarkTutorial),
        KeyCode::Char('c') => Some(Action::OpenCustomQuiz),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('q') => Some(Action::Quit),
        // Jump straight to a question by number
        KeyCode::Char(c @ '1'..='9') => Some(Action::JumpTo((c as u8 - b'1') as usize)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vim_j_maps_to_down() {
        assert_eq!(key_to_action(KeyCode::Char('j')), Some(Action::Down));
    }

    #[test]
    fn vim_k_maps_to_up() {
        assert_eq!(key_to_action(KeyCode::Char('k')), Some(Action::Up));
    }

    #[test]
    fn digits_jump_to_zero_indexed_questions() {
        assert_eq!(key_to_action(KeyCode::Char('1')), Some(Action::JumpTo(0)));
        assert_eq!(key_to_action(KeyCode::Char('9')), Some(Action::JumpTo(8)));
    }

    #[test]
    fn space_and_enter_both_select() {
        assert_eq!(key_to_action(KeyCode::Enter), Some(Action::Select));
        assert_eq!(key_to_action(KeyCode::Char(' ')), Some(Action::Select));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(key_to_action(KeyCode::Char('x')), None);
    }
}
