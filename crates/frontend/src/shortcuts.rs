use dioxus::html::input_data::keyboard_types::Key;

/// Canvas keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    DeleteSelection,
    ClearSelection,
    FitRoom,
    ZoomIn,
    ZoomOut,
    ToggleHelp,
}

pub fn shortcut_for(key: &Key) -> Option<Shortcut> {
    match key {
        Key::Delete | Key::Backspace => Some(Shortcut::DeleteSelection),
        Key::Escape => Some(Shortcut::ClearSelection),
        Key::Character(c) => match c.as_str() {
            "f" | "F" => Some(Shortcut::FitRoom),
            "+" | "=" => Some(Shortcut::ZoomIn),
            "-" | "_" => Some(Shortcut::ZoomOut),
            "h" | "H" | "?" => Some(Shortcut::ToggleHelp),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(s: &str) -> Key {
        Key::Character(s.to_string())
    }

    #[test]
    fn test_delete_keys() {
        assert_eq!(shortcut_for(&Key::Delete), Some(Shortcut::DeleteSelection));
        assert_eq!(shortcut_for(&Key::Backspace), Some(Shortcut::DeleteSelection));
    }

    #[test]
    fn test_escape_clears() {
        assert_eq!(shortcut_for(&Key::Escape), Some(Shortcut::ClearSelection));
    }

    #[test]
    fn test_character_shortcuts() {
        assert_eq!(shortcut_for(&ch("f")), Some(Shortcut::FitRoom));
        assert_eq!(shortcut_for(&ch("F")), Some(Shortcut::FitRoom));
        assert_eq!(shortcut_for(&ch("+")), Some(Shortcut::ZoomIn));
        assert_eq!(shortcut_for(&ch("=")), Some(Shortcut::ZoomIn));
        assert_eq!(shortcut_for(&ch("-")), Some(Shortcut::ZoomOut));
        assert_eq!(shortcut_for(&ch("?")), Some(Shortcut::ToggleHelp));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(shortcut_for(&ch("x")), None);
        assert_eq!(shortcut_for(&Key::Enter), None);
    }
}
