use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{*, self};
use crate::state::SPEED_STEP_MS;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Restart,
    /// Added to the tick interval, so negative is faster
    ChangeSpeed(i64),
    Quit,
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let cmd = match ev.code {
        KeyCode::Up => Command::Turn(Up),
        KeyCode::Down => Command::Turn(Down),
        KeyCode::Left => Command::Turn(Left),
        KeyCode::Right => Command::Turn(Right),
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'p' => Command::TogglePause,
            'r' => Command::Restart,
            'w' => Command::ChangeSpeed(-SPEED_STEP_MS),
            's' => Command::ChangeSpeed(SPEED_STEP_MS),
            'q' => Command::Quit,
            _ => return None,
        },
        _ => return None,
    };

    Some(cmd)
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_turn() {
        assert_eq!(command_for(&key(KeyCode::Up)), Some(Command::Turn(Up)));
        assert_eq!(command_for(&key(KeyCode::Down)), Some(Command::Turn(Down)));
        assert_eq!(command_for(&key(KeyCode::Left)), Some(Command::Turn(Left)));
        assert_eq!(command_for(&key(KeyCode::Right)), Some(Command::Turn(Right)));
    }

    #[test]
    fn test_letter_commands_ignore_case() {
        for c in ['p', 'P'].iter() {
            assert_eq!(command_for(&key(KeyCode::Char(*c))), Some(Command::TogglePause));
        }
        assert_eq!(command_for(&key(KeyCode::Char('R'))), Some(Command::Restart));
        assert_eq!(command_for(&key(KeyCode::Char('w'))), Some(Command::ChangeSpeed(-20)));
        assert_eq!(command_for(&key(KeyCode::Char('S'))), Some(Command::ChangeSpeed(20)));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(command_for(&key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
        assert_eq!(command_for(&key(KeyCode::Enter)), None);
    }
}
