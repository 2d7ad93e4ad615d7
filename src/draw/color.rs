//! RGBA color type, hex parsing and predefined color constants.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use arto::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let indigo = Color::parse("#4f46e5").unwrap();
/// assert_eq!(indigo.a, 1.0);
/// assert_eq!(red, Color::parse("red").unwrap());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Returns the same color with its alpha replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parses a CSS-style hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) or a palette name.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        match trimmed.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => name_to_color(trimmed),
        }
    }

    /// Formats the color as `#rrggbb` (alpha is appended only when not opaque).
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!(
                "#{:02x}{:02x}{:02x}",
                channel(self.r),
                channel(self.g),
                channel(self.b)
            )
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                channel(self.r),
                channel(self.g),
                channel(self.b),
                channel(self.a)
            )
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| {
                let v = c.to_digit(16).unwrap_or(0) as u8;
                v * 17
            });
            let r = channels.next()?;
            let g = channels.next()?;
            let b = channels.next()?;
            Some(Color::from_rgb8(r, g, b))
        }
        6 => Some(Color::from_rgb8(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Some(
            Color::from_rgb8(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)
                .with_alpha(f64::from(byte(&hex[6..8])?) / 255.0),
        ),
        _ => None,
    }
}

/// Maps palette names (case-insensitive) to colors.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "indigo" => Some(INDIGO),
        _ => None,
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined yellow color (R=1.0, G=1.0, B=0.0)
pub const YELLOW: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined orange color (R=1.0, G=0.5, B=0.0)
pub const ORANGE: Color = Color {
    r: 1.0,
    g: 0.5,
    b: 0.0,
    a: 1.0,
};

/// Predefined pink/magenta color (R=1.0, G=0.0, B=1.0)
pub const PINK: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Default pen color of the editor (#4f46e5)
pub const INDIGO: Color = Color {
    r: 79.0 / 255.0,
    g: 70.0 / 255.0,
    b: 229.0 / 255.0,
    a: 1.0,
};

/// Fully transparent color
pub const TRANSPARENT: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};
