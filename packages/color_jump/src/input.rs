//! Player input, as sampled once per frame by whatever polls the keyboard.

/// Which controls are held this frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    /// Jump.
    pub action: bool,
}

impl Input {
    /// Horizontal direction held, `-1`, `0`, or `1`. Right wins if both are held.
    pub fn horizontal(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        }
    }
}


#[test]
fn test_horizontal() {
    assert_eq!(Input::default().horizontal(), 0.0);
    let both = Input {
        left: true,
        right: true,
        action: false,
    };
    assert_eq!(both.horizontal(), 1.0);
    let left = Input {
        left: true,
        ..Input::default()
    };
    assert_eq!(left.horizontal(), -1.0);
}
