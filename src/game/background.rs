//! Room background selection

use serde::{Deserialize, Serialize};

/// Background animation and the frame it starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub animation: i32,
    pub frame_offset: i32,
}

impl Background {
    /// No background; encodes as `-1 -1`
    pub const NONE: Background = Background {
        animation: -1,
        frame_offset: -1,
    };

    pub fn is_none(&self) -> bool {
        self.animation < 0
    }

    pub fn encode(&self) -> String {
        format!("{} {}", self.animation, self.frame_offset)
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_sentinel() {
        assert_eq!(Background::default().encode(), "-1 -1");
        assert!(Background::NONE.is_none());
    }

    #[test]
    fn test_animated_background() {
        let background = Background { animation: 20, frame_offset: 0 };
        assert_eq!(background.encode(), "20 0");
        assert!(!background.is_none());
    }
}
