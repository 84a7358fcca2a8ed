//! Keyboard shortcuts of the design canvas.

/// A key press as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub command: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            command: false,
            shift: false,
        }
    }

    pub fn command(key: Key) -> Self {
        Self {
            key,
            command: true,
            shift: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
}

/// Canvas actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    Duplicate,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ConfirmEdit,
    Escape,
}

impl Shortcut {
    /// Resolves a key press. While a text box is being edited only Escape and
    /// Ctrl+Enter reach the canvas; everything else belongs to the editor.
    pub fn resolve(event: &KeyEvent, editing_text: bool) -> Option<Shortcut> {
        if event.key == Key::Escape {
            return Some(Shortcut::Escape);
        }
        if editing_text {
            return (event.command && event.key == Key::Enter).then_some(Shortcut::ConfirmEdit);
        }
        if !event.command {
            return None;
        }
        let Key::Char(c) = event.key else {
            return None;
        };
        match c.to_ascii_lowercase() {
            'z' if event.shift => Some(Shortcut::Redo),
            'z' => Some(Shortcut::Undo),
            'y' => Some(Shortcut::Redo),
            'd' => Some(Shortcut::Duplicate),
            '=' | '+' => Some(Shortcut::ZoomIn),
            '-' => Some(Shortcut::ZoomOut),
            '0' => Some(Shortcut::ZoomReset),
            _ => None,
        }
    }
}
