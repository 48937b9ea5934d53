use crate::foundation::error::{CarouselError, CarouselResult};

/// Output raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn width_f(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f(self) -> f64 {
        f64::from(self.height)
    }
}

/// Straight-alpha RGBA8 color.
///
/// Serialized as a hex string (`#RRGGBB`, `#RRGGBBAA` or `#RGB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB`, `#RRGGBBAA` or the `#RGB` shorthand.
    pub fn from_hex(s: &str) -> CarouselResult<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| CarouselError::config(format!("color '{s}' must start with '#'")))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CarouselError::config(format!(
                "color '{s}' contains non-hex digits"
            )));
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);

        match digits.len() {
            3 => Ok(Self::rgb(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17)),
            6 => Ok(Self::rgb(byte(0), byte(2), byte(4))),
            8 => Ok(Self::rgba(byte(0), byte(2), byte(4), byte(6))),
            _ => Err(CarouselError::config(format!(
                "color '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }

    /// Premultiplied channel bytes, as stored in raster surfaces.
    pub fn premultiplied(self) -> [u8; 4] {
        let a16 = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    pub fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = CarouselError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
