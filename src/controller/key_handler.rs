use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// One logical keypress, normalized so it can key the command tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Ordered chords that trigger a command: one for a direct binding,
/// two for an operator followed by a motion.
pub type KeySequence = Vec<KeyChord>;

impl KeyChord {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report `Y` as `Char('Y')` plus SHIFT; the shift is already in the char.
    pub fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        if let KeyCode::Char(_) = event.code {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self::new(event.code, modifiers)
    }

    /// The char this chord types in Insert mode, if it types one.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !c.is_control()
                    && !self
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    pub fn is_cancel(&self) -> bool {
        self.code == KeyCode::Esc
    }
}

impl From<KeyEvent> for KeyChord {
    fn from(event: KeyEvent) -> Self {
        Self::from_event(&event)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "CR".to_string(),
            KeyCode::Backspace => "BS".to_string(),
            KeyCode::Delete => "Del".to_string(),
            other => format!("{other:?}"),
        };
        let plain_char = matches!(self.code, KeyCode::Char(c) if c != ' ');
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "<C-{name}>")
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "<M-{name}>")
        } else if plain_char {
            write!(f, "{name}")
        } else {
            write!(f, "<{name}>")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_is_folded_into_char() {
        let event = KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT);
        assert_eq!(KeyChord::from_event(&event), KeyChord::char('Y'));

        let event = KeyEvent::new(KeyCode::Char('$'), KeyModifiers::SHIFT);
        assert_eq!(KeyChord::from(event), KeyChord::char('$'));
    }

    #[test]
    fn test_shift_kept_for_special_keys() {
        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT);
        assert_eq!(
            KeyChord::from_event(&event),
            KeyChord::new(KeyCode::Enter, KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_printable() {
        assert_eq!(KeyChord::char('a').printable(), Some('a'));
        assert_eq!(KeyChord::ctrl('a').printable(), None);
        assert_eq!(KeyChord::plain(KeyCode::Enter).printable(), None);
        assert_eq!(KeyChord::char('\u{1b}').printable(), None);
        assert_eq!(KeyChord::char('\t').printable(), None);
        assert_eq!(
            KeyChord::new(KeyCode::Char('x'), KeyModifiers::ALT).printable(),
            None
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyChord::char('y').to_string(), "y");
        assert_eq!(KeyChord::ctrl('r').to_string(), "<C-r>");
        assert_eq!(KeyChord::plain(KeyCode::Esc).to_string(), "<Esc>");
        assert_eq!(KeyChord::char(' ').to_string(), "<Space>");
    }
}
