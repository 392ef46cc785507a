//! RGB color values as the transformation grammar expects them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A color stored as six uppercase hex digits without a leading `#`.
///
/// Input is normalized leniently: a leading `#` is stripped, 3-digit
/// shorthand is expanded, and case is folded. Values that are not hex
/// colors are kept verbatim so they reach the remote service unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RgbColor(String);

impl RgbColor {
    pub const WHITE: &'static str = "FFFFFF";
    pub const BLACK: &'static str = "000000";

    /// Normalize any input, passing malformed values through.
    pub fn new(value: impl AsRef<str>) -> Self {
        let raw = value.as_ref().trim();
        Self(normalize_hex(raw).unwrap_or_else(|| raw.trim_start_matches('#').to_string()))
    }

    pub fn white() -> Self {
        Self(Self::WHITE.to_string())
    }

    pub fn black() -> Self {
        Self(Self::BLACK.to_string())
    }

    /// The hex digits without `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is a well-formed 6-digit hex color.
    pub fn is_valid(&self) -> bool {
        self.0.len() == 6 && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// `#RRGGBB` form for local rendering.
    pub fn to_css(&self) -> String {
        format!("#{}", self.0)
    }
}

fn normalize_hex(raw: &str) -> Option<String> {
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some(digits.to_ascii_uppercase()),
        3 => Some(
            digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
        ),
        _ => None,
    }
}

impl From<String> for RgbColor {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for RgbColor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<RgbColor> for String {
    fn from(value: RgbColor) -> Self {
        value.0
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
