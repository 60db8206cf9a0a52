//! Keyboard Shortcuts
//!
//! Ctrl+Z undoes, Ctrl+Y or Ctrl+Shift+Z redoes, Ctrl+Delete clears the canvas.

/// Key pressed, as reported by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Other,
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const CTRL: Modifiers = Modifiers { ctrl: true, alt: false, shift: false, meta: false };
    pub const CTRL_SHIFT: Modifiers = Modifiers { ctrl: true, alt: false, shift: true, meta: false };
}

/// Session-level command a shortcut triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    Clear,
}

impl Command {
    /// Map a key press to a command
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Command> {
        if !modifiers.ctrl {
            return None;
        }
        match key {
            Key::Char(c) if c.eq_ignore_ascii_case(&'z') => {
                if modifiers.shift {
                    Some(Command::Redo)
                } else {
                    Some(Command::Undo)
                }
            }
            Key::Char(c) if c.eq_ignore_ascii_case(&'y') => Some(Command::Redo),
            Key::Delete => Some(Command::Clear),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts() {
        assert_eq!(Command::from_key(Key::Char('z'), Modifiers::CTRL), Some(Command::Undo));
        assert_eq!(Command::from_key(Key::Char('y'), Modifiers::CTRL), Some(Command::Redo));
        assert_eq!(Command::from_key(Key::Char('Z'), Modifiers::CTRL_SHIFT), Some(Command::Redo));
        assert_eq!(Command::from_key(Key::Char('z'), Modifiers::CTRL_SHIFT), Some(Command::Redo));
        assert_eq!(Command::from_key(Key::Delete, Modifiers::CTRL), Some(Command::Clear));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(Command::from_key(Key::Char('z'), Modifiers::default()), None);
        assert_eq!(Command::from_key(Key::Delete, Modifiers::default()), None);
        assert_eq!(Command::from_key(Key::Char('x'), Modifiers::CTRL), None);
        assert_eq!(Command::from_key(Key::Other, Modifiers::CTRL), None);
    }
}
