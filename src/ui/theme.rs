use crossterm::style::Color;

use crate::ui::surface::TextStyle;

/// Gray level of live text.
pub const FULL_BRIGHTNESS: u8 = 255;

pub const fn gray(level: u8) -> Color {
    Color::Rgb {
        r: level,
        g: level,
        b: level,
    }
}

/// Foreground color for a style, `None` meaning the terminal default.
pub fn foreground(style: TextStyle) -> Option<Color> {
    match style {
        TextStyle::Body => None,
        TextStyle::Faded(level) | TextStyle::Status(level) => Some(gray(level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_uses_terminal_default() {
        assert_eq!(foreground(TextStyle::Body), None);
    }

    #[test]
    fn faded_and_status_are_gray() {
        assert_eq!(
            foreground(TextStyle::Faded(10)),
            Some(Color::Rgb {
                r: 10,
                g: 10,
                b: 10
            })
        );
        assert_eq!(foreground(TextStyle::Status(128)), Some(gray(128)));
    }
}
