use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Input {
    None,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Quit,
    Resize { width: u16, height: u16 },
}

impl Input {
    pub fn from_event(ev: &Event) -> Input {
        match ev {
            Event::Key(key) => Input::from_key(key),
            Event::Resize(width, height) => Input::Resize { width: *width, height: *height },
            _ => Input::None,
        }
    }

    pub fn from_key(key: &KeyEvent) -> Input {
        if key.kind != KeyEventKind::Press {
            return Input::None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
            KeyCode::Char('w') | KeyCode::Up => Input::Up,
            KeyCode::Char('a') | KeyCode::Left => Input::Left,
            KeyCode::Char('s') | KeyCode::Down => Input::Down,
            KeyCode::Char('d') | KeyCode::Right => Input::Right,
            KeyCode::Enter => Input::Enter,
            KeyCode::Esc | KeyCode::F(1) => Input::Quit,
            _ => Input::None,
        }
    }
}

pub fn poll_input(timeout: Duration) -> io::Result<Input> {
    if poll(timeout)? {
        Ok(Input::from_event(&read()?))
    } else {
        Ok(Input::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(Input::from_key(&key(KeyCode::Up, KeyModifiers::NONE)), Input::Up);
        assert_eq!(Input::from_key(&key(KeyCode::Char('a'), KeyModifiers::NONE)), Input::Left);
        assert_eq!(Input::from_key(&key(KeyCode::Char('s'), KeyModifiers::NONE)), Input::Down);
        assert_eq!(Input::from_key(&key(KeyCode::Right, KeyModifiers::NONE)), Input::Right);
    }

    #[test]
    fn quit_keys() {
        assert_eq!(Input::from_key(&key(KeyCode::Esc, KeyModifiers::NONE)), Input::Quit);
        assert_eq!(Input::from_key(&key(KeyCode::F(1), KeyModifiers::NONE)), Input::Quit);
        assert_eq!(Input::from_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Input::Quit);
        assert_eq!(Input::from_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)), Input::None);
    }

    #[test]
    fn releases_and_unknown_keys_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Input::from_key(&release), Input::None);
        assert_eq!(Input::from_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)), Input::None);
        assert_eq!(Input::from_key(&key(KeyCode::Enter, KeyModifiers::NONE)), Input::Enter);
    }

    #[test]
    fn resize_carries_new_size() {
        assert_eq!(Input::from_event(&Event::Resize(120, 48)), Input::Resize { width: 120, height: 48 });
        assert_eq!(Input::from_event(&Event::FocusLost), Input::None);
    }
}
