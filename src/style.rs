use bon::Builder;
use thiserror::Error;

// ============================================================================
// COLOR
// ============================================================================

/// Color representation for dial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

// ============================================================================
// DIAL STYLE
// ============================================================================

/// The three rotating indicators of the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Hour, Hand::Minute, Hand::Second];
}

/// Color, length and width of a single hand, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandStyle {
    pub color: Color,
    pub length: f32,
    pub width: f32,
}

/// User-configurable look of the clock. Set once when the view is built.
///
/// Lengths and widths are not validated: negative or oversized values are
/// handed to the renderer as-is.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DialStyle {
    #[builder(default = Color::BLACK)]
    pub hour_line_color: Color,
    #[builder(default = Color::BLACK)]
    pub minute_line_color: Color,
    #[builder(default = Color::BLACK)]
    pub second_line_color: Color,

    #[builder(default)]
    pub hour_line_length: f32,
    #[builder(default)]
    pub minute_line_length: f32,
    #[builder(default)]
    pub second_line_length: f32,

    #[builder(default)]
    pub hour_line_width: f32,
    #[builder(default)]
    pub minute_line_width: f32,
    #[builder(default)]
    pub second_line_width: f32,
}

impl Default for DialStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DialStyle {
    pub fn hand(&self, hand: Hand) -> HandStyle {
        match hand {
            Hand::Hour => HandStyle {
                color: self.hour_line_color,
                length: self.hour_line_length,
                width: self.hour_line_width,
            },
            Hand::Minute => HandStyle {
                color: self.minute_line_color,
                length: self.minute_line_length,
                width: self.minute_line_width,
            },
            Hand::Second => HandStyle {
                color: self.second_line_color,
                length: self.second_line_length,
                width: self.second_line_width,
            },
        }
    }

    /// Builds a style from named attributes such as `hour_line_color = "#ff0000"`.
    ///
    /// Anything that does not parse is logged and skipped, leaving the default
    /// (black, zero length, zero width) in place.
    pub fn from_attributes<'a, I>(attributes: I, metrics: &DisplayMetrics) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut style = Self::default();
        for (name, value) in attributes {
            if let Err(err) = style.apply_attribute(name, value, metrics) {
                tracing::warn!(%err, name, value, "ignoring dial attribute");
            }
        }
        tracing::debug!(?style, "dial style resolved");
        style
    }

    fn apply_attribute(
        &mut self,
        name: &str,
        value: &str,
        metrics: &DisplayMetrics,
    ) -> Result<(), AttributeError> {
        match name {
            "hour_line_color" => self.hour_line_color = parse_color(value)?,
            "minute_line_color" => self.minute_line_color = parse_color(value)?,
            "second_line_color" => self.second_line_color = parse_color(value)?,
            "hour_line_length" => self.hour_line_length = parse_dimension(value, metrics)?,
            "minute_line_length" => self.minute_line_length = parse_dimension(value, metrics)?,
            "second_line_length" => self.second_line_length = parse_dimension(value, metrics)?,
            "hour_line_width" => self.hour_line_width = parse_dimension(value, metrics)?,
            "minute_line_width" => self.minute_line_width = parse_dimension(value, metrics)?,
            "second_line_width" => self.second_line_width = parse_dimension(value, metrics)?,
            other => return Err(AttributeError::UnknownAttribute(other.to_string())),
        }
        Ok(())
    }
}

// ============================================================================
// ATTRIBUTE PARSING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("invalid dimension `{0}`")]
    InvalidDimension(String),
}

/// Screen metrics used to resolve density-dependent dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub density: f32,
    pub font_scale: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            font_scale: 1.0,
        }
    }
}

impl DisplayMetrics {
    /// Dots per inch implied by the density; 1.0 is the 160 dpi baseline.
    pub fn xdpi(&self) -> f32 {
        self.density * 160.0
    }
}

/// Parses `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB` or a color name.
pub fn parse_color(value: &str) -> Result<Color, AttributeError> {
    let trimmed = value.trim();
    let invalid = || AttributeError::InvalidColor(value.to_string());

    let Some(hex) = trimmed.strip_prefix('#') else {
        return named_color(&trimmed.to_ascii_lowercase()).ok_or_else(invalid);
    };

    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)?;
    let byte = |hi: u8, lo: u8| hi * 16 + lo;

    match digits.as_slice() {
        &[r, g, b] => Ok(Color::new(byte(r, r), byte(g, g), byte(b, b))),
        &[a, r, g, b] => Ok(Color::new(byte(r, r), byte(g, g), byte(b, b)).with_alpha(byte(a, a))),
        &[r1, r2, g1, g2, b1, b2] => Ok(Color::new(byte(r1, r2), byte(g1, g2), byte(b1, b2))),
        &[a1, a2, r1, r2, g1, g2, b1, b2] => {
            Ok(Color::new(byte(r1, r2), byte(g1, g2), byte(b1, b2)).with_alpha(byte(a1, a2)))
        }
        _ => Err(invalid()),
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::new(0xff, 0x00, 0x00),
        "green" | "lime" => Color::new(0x00, 0xff, 0x00),
        "blue" => Color::new(0x00, 0x00, 0xff),
        "yellow" => Color::new(0xff, 0xff, 0x00),
        "cyan" | "aqua" => Color::new(0x00, 0xff, 0xff),
        "magenta" | "fuchsia" => Color::new(0xff, 0x00, 0xff),
        "gray" | "grey" => Color::new(0x88, 0x88, 0x88),
        "lightgray" | "lightgrey" => Color::new(0xcc, 0xcc, 0xcc),
        "darkgray" | "darkgrey" => Color::new(0x44, 0x44, 0x44),
        "maroon" => Color::new(0x80, 0x00, 0x00),
        "navy" => Color::new(0x00, 0x00, 0x80),
        "olive" => Color::new(0x80, 0x80, 0x00),
        "purple" => Color::new(0x80, 0x00, 0x80),
        "silver" => Color::new(0xc0, 0xc0, 0xc0),
        "teal" => Color::new(0x00, 0x80, 0x80),
        _ => return None,
    };
    Some(color)
}

/// Parses a number with an optional `px`, `dp`/`dip`, `sp`, `pt`, `in` or
/// `mm` suffix into device pixels.
pub fn parse_dimension(value: &str, metrics: &DisplayMetrics) -> Result<f32, AttributeError> {
    let trimmed = value.trim();
    let invalid = || AttributeError::InvalidDimension(value.to_string());

    // The unit is the trailing run of letters, so an exponent ("2.5E1dp")
    // stays with the number.
    let split = trimmed
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .len();
    let (number, unit) = trimmed.split_at(split);
    let number: f32 = number.trim().parse().map_err(|_| invalid())?;

    let scale = match unit.to_ascii_lowercase().as_str() {
        "" | "px" => 1.0,
        "dp" | "dip" => metrics.density,
        "sp" => metrics.density * metrics.font_scale,
        "pt" => metrics.xdpi() / 72.0,
        "in" => metrics.xdpi(),
        "mm" => metrics.xdpi() / 25.4,
        _ => return Err(invalid()),
    };
    Ok(number * scale)
}
