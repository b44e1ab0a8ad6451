//! CSS color strings → RGB, for backends that need concrete pixel colors.
//!
//! Covers the forms vector files actually use: common named colors,
//! `#rgb`, `#rrggbb` and `rgb(r, g, b)`. Anything else returns `None` and the
//! caller decides on a fallback.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

const NAMED: [(&str, Rgb8); 22] = [
    ("black", Rgb8::new(0, 0, 0)),
    ("white", Rgb8::new(255, 255, 255)),
    ("gray", Rgb8::new(128, 128, 128)),
    ("grey", Rgb8::new(128, 128, 128)),
    ("darkgray", Rgb8::new(169, 169, 169)),
    ("lightgray", Rgb8::new(211, 211, 211)),
    ("silver", Rgb8::new(192, 192, 192)),
    ("red", Rgb8::new(255, 0, 0)),
    ("maroon", Rgb8::new(128, 0, 0)),
    ("orange", Rgb8::new(255, 165, 0)),
    ("yellow", Rgb8::new(255, 255, 0)),
    ("olive", Rgb8::new(128, 128, 0)),
    ("lime", Rgb8::new(0, 255, 0)),
    ("green", Rgb8::new(0, 128, 0)),
    ("teal", Rgb8::new(0, 128, 128)),
    ("cyan", Rgb8::new(0, 255, 255)),
    ("blue", Rgb8::new(0, 0, 255)),
    ("navy", Rgb8::new(0, 0, 128)),
    ("purple", Rgb8::new(128, 0, 128)),
    ("magenta", Rgb8::new(255, 0, 255)),
    ("brown", Rgb8::new(165, 42, 42)),
    ("pink", Rgb8::new(255, 192, 203)),
];

pub fn parse_css_color(s: &str) -> Option<Rgb8> {
    let s = s.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let parts: Vec<u8> = args
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .ok()?;
        return match parts.as_slice() {
            [r, g, b] => Some(Rgb8::new(*r, *g, *b)),
            _ => None,
        };
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == s)
        .map(|(_, rgb)| *rgb)
}

fn parse_hex(hex: &str) -> Option<Rgb8> {
    let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        3 => Some(Rgb8::new(
            digit(0, 1)? * 17,
            digit(1, 1)? * 17,
            digit(2, 1)? * 17,
        )),
        6 => Some(Rgb8::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_forms() {
        assert_eq!(parse_css_color("red"), Some(Rgb8::new(255, 0, 0)));
        assert_eq!(parse_css_color(" Gray "), Some(Rgb8::new(128, 128, 128)));
        assert_eq!(parse_css_color("#0f8"), Some(Rgb8::new(0, 255, 136)));
        assert_eq!(parse_css_color("#4472C4"), Some(Rgb8::new(68, 114, 196)));
        assert_eq!(
            parse_css_color("rgb(1, 2, 3)"),
            Some(Rgb8::new(1, 2, 3))
        );
    }

    #[test]
    fn rejects_unknown_forms() {
        assert_eq!(parse_css_color("chartreuse-ish"), None);
        assert_eq!(parse_css_color("#12"), None);
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
        assert_eq!(parse_css_color("rgb(300, 0, 0)"), None);
    }

    #[test]
    fn hex_round_trip_is_uppercase() {
        assert_eq!(Rgb8::new(68, 114, 196).to_hex(), "#4472C4");
    }
}
