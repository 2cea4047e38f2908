//! Text-mode color attributes.

/// The 16 colors of the VGA text-mode palette.
///
/// Both foreground and background take any of these; the hardware packs
/// them into the upper byte of each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// A packed foreground/background attribute byte: `fg | bg << 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self((foreground as u8) | (background as u8) << 4)
    }

    /// The attribute byte as stored in video memory.
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub const fn foreground(self) -> Color {
        Color::from_nibble(self.0)
    }

    pub const fn background(self) -> Color {
        Color::from_nibble(self.0 >> 4)
    }

    /// Light gray on black, the attribute the BIOS leaves behind.
    pub const DEFAULT: ColorCode = ColorCode::new(Color::LightGray, Color::Black);
}

impl Default for ColorCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Color {
    /// Decode the low four bits of `bits`.
    const fn from_nibble(bits: u8) -> Self {
        match bits & 0x0F {
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Red,
            5 => Color::Magenta,
            6 => Color::Brown,
            7 => Color::LightGray,
            8 => Color::DarkGray,
            9 => Color::LightBlue,
            10 => Color::LightGreen,
            11 => Color::LightCyan,
            12 => Color::LightRed,
            13 => Color::Pink,
            14 => Color::Yellow,
            _ => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_foreground_low_background_high() {
        assert_eq!(ColorCode::new(Color::White, Color::Black).as_u8(), 0x0F);
        assert_eq!(ColorCode::new(Color::White, Color::Red).as_u8(), 0x4F);
        assert_eq!(ColorCode::DEFAULT.as_u8(), 0x07);
    }

    #[test]
    fn unpacks_both_halves() {
        let code = ColorCode::new(Color::Yellow, Color::Blue);
        assert_eq!(code.foreground(), Color::Yellow);
        assert_eq!(code.background(), Color::Blue);
    }
}
