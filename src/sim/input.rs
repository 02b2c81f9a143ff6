//! Key press mapping

use super::tile::Side;

/// A key-down as seen by the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Left,
    Right,
    /// Any key that is not a horizontal arrow
    Other,
}

impl KeyInput {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Self {
        match key.strip_prefix("Arrow").unwrap_or(key) {
            "Left" => KeyInput::Left,
            "Right" => KeyInput::Right,
            _ => KeyInput::Other,
        }
    }

    /// True when this key clears a tile whose safe side is `side`
    pub fn matches(self, side: Side) -> bool {
        matches!(
            (self, side),
            (KeyInput::Left, Side::Left) | (KeyInput::Right, Side::Right)
        )
    }
}

impl From<Side> for KeyInput {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => KeyInput::Left,
            Side::Right => KeyInput::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(KeyInput::from_key("ArrowLeft"), KeyInput::Left);
        assert_eq!(KeyInput::from_key("ArrowRight"), KeyInput::Right);
        assert_eq!(KeyInput::from_key("Left"), KeyInput::Left);
        assert_eq!(KeyInput::from_key("Right"), KeyInput::Right);
    }

    #[test]
    fn test_other_keys() {
        for key in ["ArrowUp", "ArrowDown", " ", "a", "Enter", "left", ""] {
            assert_eq!(KeyInput::from_key(key), KeyInput::Other, "key {key:?}");
        }
    }

    #[test]
    fn test_matches() {
        assert!(KeyInput::Left.matches(Side::Left));
        assert!(KeyInput::Right.matches(Side::Right));
        assert!(!KeyInput::Left.matches(Side::Right));
        assert!(!KeyInput::Right.matches(Side::Left));
        assert!(!KeyInput::Other.matches(Side::Left));
        assert!(!KeyInput::Other.matches(Side::Right));
    }
}
