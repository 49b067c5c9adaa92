use crate::RowsError;
use serde::Deserialize;
use std::str::FromStr;

/// A colour, expressed in RGB, CMYK, or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a CSS-style colour string: `#rgb`, `#rrggbb`, or one of a handful of
    /// named colours (`black`, `white`, `red`, `green`, `blue`, `yellow`, `grey`/`gray`)
    pub fn parse_css(s: &str) -> Result<Colour, RowsError> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| RowsError::InvalidColour(s.to_string()));
        }

        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(colours::BLACK),
            "white" => Ok(colours::WHITE),
            "red" => Ok(colours::RED),
            "green" => Ok(colours::GREEN),
            "blue" => Ok(colours::BLUE),
            "yellow" => Ok(Colour::new_rgb(1.0, 1.0, 0.0)),
            "grey" | "gray" => Ok(Colour::new_rgb_bytes(128, 128, 128)),
            _ => Err(RowsError::InvalidColour(s.to_string())),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Colour> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).ok();
    match hex.len() {
        // #rgb expands each digit, so 0xa becomes 0xaa
        3 => Some(Colour::new_rgb_bytes(
            channel(0, 1)? * 17,
            channel(1, 1)? * 17,
            channel(2, 1)? * 17,
        )),
        6 => Some(Colour::new_rgb_bytes(
            channel(0, 2)?,
            channel(2, 2)?,
            channel(4, 2)?,
        )),
        _ => None,
    }
}

impl FromStr for Colour {
    type Err = RowsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::parse_css(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = RowsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Colour::parse_css(&s)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
    /// `#333`, the default text colour of a [`PageGeometry`](crate::PageGeometry)
    pub const CHARCOAL: Colour = Colour::RGB {
        r: 0.2,
        g: 0.2,
        b: 0.2,
    };
    /// `#BABABA`, the default colour of the padding corner guides
    pub const SILVER: Colour = Colour::RGB {
        r: 186.0 / 255.0,
        g: 186.0 / 255.0,
        b: 186.0 / 255.0,
    };
}
