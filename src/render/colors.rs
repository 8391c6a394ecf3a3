//! Color parsing and label contrast.
//!
//! Colors stay CSS strings end to end (they go straight into `fillStyle`);
//! parsing only happens to pick a readable label color, and that result is
//! cached per distinct color string.

use std::collections::HashMap;

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// HSL lightness in `[0, 1]`: the mean of the largest and smallest
    /// channel.
    pub fn lightness(self) -> f64 {
        Rgba::from(self).lightness()
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Parsed color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgba {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Rgba {
    fn lightness(self) -> f64 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        (max + min) / 2.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255
    fn to_u8(channel: f64) -> u8 {
        (channel * 255.0).round().clamp(0.0, 255.0) as u8
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self {
            r: f64::from(rgb.r) / 255.0,
            g: f64::from(rgb.g) / 255.0,
            b: f64::from(rgb.b) / 255.0,
            a: 1.0,
        }
    }
}

/// CSS named color keywords.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("aliceblue", Rgb::new(240, 248, 255)),
    ("antiquewhite", Rgb::new(250, 235, 215)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("aquamarine", Rgb::new(127, 255, 212)),
    ("azure", Rgb::new(240, 255, 255)),
    ("beige", Rgb::new(245, 245, 220)),
    ("bisque", Rgb::new(255, 228, 196)),
    ("black", Rgb::new(0, 0, 0)),
    ("blanchedalmond", Rgb::new(255, 235, 205)),
    ("blue", Rgb::new(0, 0, 255)),
    ("blueviolet", Rgb::new(138, 43, 226)),
    ("brown", Rgb::new(165, 42, 42)),
    ("burlywood", Rgb::new(222, 184, 135)),
    ("cadetblue", Rgb::new(95, 158, 160)),
    ("chartreuse", Rgb::new(127, 255, 0)),
    ("chocolate", Rgb::new(210, 105, 30)),
    ("coral", Rgb::new(255, 127, 80)),
    ("cornflowerblue", Rgb::new(100, 149, 237)),
    ("cornsilk", Rgb::new(255, 248, 220)),
    ("crimson", Rgb::new(220, 20, 60)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("darkblue", Rgb::new(0, 0, 139)),
    ("darkcyan", Rgb::new(0, 139, 139)),
    ("darkgoldenrod", Rgb::new(184, 134, 11)),
    ("darkgray", Rgb::new(169, 169, 169)),
    ("darkgreen", Rgb::new(0, 100, 0)),
    ("darkgrey", Rgb::new(169, 169, 169)),
    ("darkkhaki", Rgb::new(189, 183, 107)),
    ("darkmagenta", Rgb::new(139, 0, 139)),
    ("darkolivegreen", Rgb::new(85, 107, 47)),
    ("darkorange", Rgb::new(255, 140, 0)),
    ("darkorchid", Rgb::new(153, 50, 204)),
    ("darkred", Rgb::new(139, 0, 0)),
    ("darksalmon", Rgb::new(233, 150, 122)),
    ("darkseagreen", Rgb::new(143, 188, 143)),
    ("darkslateblue", Rgb::new(72, 61, 139)),
    ("darkslategray", Rgb::new(47, 79, 79)),
    ("darkslategrey", Rgb::new(47, 79, 79)),
    ("darkturquoise", Rgb::new(0, 206, 209)),
    ("darkviolet", Rgb::new(148, 0, 211)),
    ("deeppink", Rgb::new(255, 20, 147)),
    ("deepskyblue", Rgb::new(0, 191, 255)),
    ("dimgray", Rgb::new(105, 105, 105)),
    ("dimgrey", Rgb::new(105, 105, 105)),
    ("dodgerblue", Rgb::new(30, 144, 255)),
    ("firebrick", Rgb::new(178, 34, 34)),
    ("floralwhite", Rgb::new(255, 250, 240)),
    ("forestgreen", Rgb::new(34, 139, 34)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("gainsboro", Rgb::new(220, 220, 220)),
    ("ghostwhite", Rgb::new(248, 248, 255)),
    ("gold", Rgb::new(255, 215, 0)),
    ("goldenrod", Rgb::new(218, 165, 32)),
    ("gray", Rgb::new(128, 128, 128)),
    ("green", Rgb::new(0, 128, 0)),
    ("greenyellow", Rgb::new(173, 255, 47)),
    ("grey", Rgb::new(128, 128, 128)),
    ("honeydew", Rgb::new(240, 255, 240)),
    ("hotpink", Rgb::new(255, 105, 180)),
    ("indianred", Rgb::new(205, 92, 92)),
    ("indigo", Rgb::new(75, 0, 130)),
    ("ivory", Rgb::new(255, 255, 240)),
    ("khaki", Rgb::new(240, 230, 140)),
    ("lavender", Rgb::new(230, 230, 250)),
    ("lavenderblush", Rgb::new(255, 240, 245)),
    ("lawngreen", Rgb::new(124, 252, 0)),
    ("lemonchiffon", Rgb::new(255, 250, 205)),
    ("lightblue", Rgb::new(173, 216, 230)),
    ("lightcoral", Rgb::new(240, 128, 128)),
    ("lightcyan", Rgb::new(224, 255, 255)),
    ("lightgoldenrodyellow", Rgb::new(250, 250, 210)),
    ("lightgray", Rgb::new(211, 211, 211)),
    ("lightgreen", Rgb::new(144, 238, 144)),
    ("lightgrey", Rgb::new(211, 211, 211)),
    ("lightpink", Rgb::new(255, 182, 193)),
    ("lightsalmon", Rgb::new(255, 160, 122)),
    ("lightseagreen", Rgb::new(32, 178, 170)),
    ("lightskyblue", Rgb::new(135, 206, 250)),
    ("lightslategray", Rgb::new(119, 136, 153)),
    ("lightslategrey", Rgb::new(119, 136, 153)),
    ("lightsteelblue", Rgb::new(176, 196, 222)),
    ("lightyellow", Rgb::new(255, 255, 224)),
    ("lime", Rgb::new(0, 255, 0)),
    ("limegreen", Rgb::new(50, 205, 50)),
    ("linen", Rgb::new(250, 240, 230)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("mediumaquamarine", Rgb::new(102, 205, 170)),
    ("mediumblue", Rgb::new(0, 0, 205)),
    ("mediumorchid", Rgb::new(186, 85, 211)),
    ("mediumpurple", Rgb::new(147, 112, 219)),
    ("mediumseagreen", Rgb::new(60, 179, 113)),
    ("mediumslateblue", Rgb::new(123, 104, 238)),
    ("mediumspringgreen", Rgb::new(0, 250, 154)),
    ("mediumturquoise", Rgb::new(72, 209, 204)),
    ("mediumvioletred", Rgb::new(199, 21, 133)),
    ("midnightblue", Rgb::new(25, 25, 112)),
    ("mintcream", Rgb::new(245, 255, 250)),
    ("mistyrose", Rgb::new(255, 228, 225)),
    ("moccasin", Rgb::new(255, 228, 181)),
    ("navajowhite", Rgb::new(255, 222, 173)),
    ("navy", Rgb::new(0, 0, 128)),
    ("oldlace", Rgb::new(253, 245, 230)),
    ("olive", Rgb::new(128, 128, 0)),
    ("olivedrab", Rgb::new(107, 142, 35)),
    ("orange", Rgb::new(255, 165, 0)),
    ("orangered", Rgb::new(255, 69, 0)),
    ("orchid", Rgb::new(218, 112, 214)),
    ("palegoldenrod", Rgb::new(238, 232, 170)),
    ("palegreen", Rgb::new(152, 251, 152)),
    ("paleturquoise", Rgb::new(175, 238, 238)),
    ("palevioletred", Rgb::new(219, 112, 147)),
    ("papayawhip", Rgb::new(255, 239, 213)),
    ("peachpuff", Rgb::new(255, 218, 185)),
    ("peru", Rgb::new(205, 133, 63)),
    ("pink", Rgb::new(255, 192, 203)),
    ("plum", Rgb::new(221, 160, 221)),
    ("powderblue", Rgb::new(176, 224, 230)),
    ("purple", Rgb::new(128, 0, 128)),
    ("rebeccapurple", Rgb::new(102, 51, 153)),
    ("red", Rgb::new(255, 0, 0)),
    ("rosybrown", Rgb::new(188, 143, 143)),
    ("royalblue", Rgb::new(65, 105, 225)),
    ("saddlebrown", Rgb::new(139, 69, 19)),
    ("salmon", Rgb::new(250, 128, 114)),
    ("sandybrown", Rgb::new(244, 164, 96)),
    ("seagreen", Rgb::new(46, 139, 87)),
    ("seashell", Rgb::new(255, 245, 238)),
    ("sienna", Rgb::new(160, 82, 45)),
    ("silver", Rgb::new(192, 192, 192)),
    ("skyblue", Rgb::new(135, 206, 235)),
    ("slateblue", Rgb::new(106, 90, 205)),
    ("slategray", Rgb::new(112, 128, 144)),
    ("slategrey", Rgb::new(112, 128, 144)),
    ("snow", Rgb::new(255, 250, 250)),
    ("springgreen", Rgb::new(0, 255, 127)),
    ("steelblue", Rgb::new(70, 130, 180)),
    ("tan", Rgb::new(210, 180, 140)),
    ("teal", Rgb::new(0, 128, 128)),
    ("thistle", Rgb::new(216, 191, 216)),
    ("tomato", Rgb::new(255, 99, 71)),
    ("turquoise", Rgb::new(64, 224, 208)),
    ("violet", Rgb::new(238, 130, 238)),
    ("wheat", Rgb::new(245, 222, 179)),
    ("white", Rgb::new(255, 255, 255)),
    ("whitesmoke", Rgb::new(245, 245, 245)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("yellowgreen", Rgb::new(154, 205, 50)),
];

/// Parse color and return RGBA components (0-255 for RGB, 0.0-1.0 for alpha)
///
/// Supports formats:
/// - "#RGB", "#RGBA", "#RRGGBB", "#RRGGBBAA"
/// - "rgb()" / "rgba()" in comma or space syntax, numbers or percentages,
///   optional alpha after a comma or `/`
/// - "hsl()" / "hsla()" likewise, hue in deg, rad, grad or turn
/// - every CSS named color, plus "transparent"
pub fn parse_color_rgba(s: &str) -> Option<(u8, u8, u8, f64)> {
    let color = parse_color(s)?;
    Some((
        Rgba::to_u8(color.r),
        Rgba::to_u8(color.g),
        Rgba::to_u8(color.b),
        color.a,
    ))
}

fn parse_color(s: &str) -> Option<Rgba> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if s.contains('(') {
        return parse_function(s);
    }
    let lower = s.to_ascii_lowercase();
    if lower == "transparent" {
        return Some(Rgba {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.0,
        });
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| Rgba::from(*rgb))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| -> Option<f64> {
        let v = u8::from_str_radix(hex.get(i..=i)?, 16).ok()?;
        Some(f64::from(v * 17) / 255.0)
    };
    let byte = |i: usize| -> Option<f64> {
        let v = u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?;
        Some(f64::from(v) / 255.0)
    };

    // CSS order: alpha last
    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 1.0),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 1.0),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Rgba { r, g, b, a })
}

/// Split `name(args)` into the lowercase name, three components and an
/// optional alpha, accepting both `a, b, c, d` and `a b c / d`.
fn split_function(s: &str) -> Option<(String, [&str; 3], Option<&str>)> {
    let (name, rest) = s.split_once('(')?;
    let inner = rest.trim_end().strip_suffix(')')?;
    let name = name.trim().to_ascii_lowercase();

    let mut parts: Vec<&str>;
    let alpha;
    if inner.contains(',') {
        parts = inner.split(',').map(str::trim).collect();
        alpha = if parts.len() == 4 { parts.pop() } else { None };
    } else {
        let (channels, a) = match inner.split_once('/') {
            Some((channels, a)) => (channels, Some(a.trim())),
            None => (inner, None),
        };
        parts = channels.split_whitespace().collect();
        alpha = a;
    }

    match parts.as_slice() {
        [x, y, z] => Some((name, [*x, *y, *z], alpha)),
        _ => None,
    }
}

fn parse_function(s: &str) -> Option<Rgba> {
    let (name, [x, y, z], alpha) = split_function(s)?;
    let a = match alpha {
        Some(alpha) => parse_alpha(alpha)?,
        None => 1.0,
    };
    match name.as_str() {
        "rgb" | "rgba" => Some(Rgba {
            r: parse_rgb_channel(x)?,
            g: parse_rgb_channel(y)?,
            b: parse_rgb_channel(z)?,
            a,
        }),
        "hsl" | "hsla" => {
            let (r, g, b) = hsl_to_rgb(parse_hue(x)?, parse_fraction(y)?, parse_fraction(z)?);
            Some(Rgba { r, g, b, a })
        }
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    if s.eq_ignore_ascii_case("none") {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `0..255` or a percentage, as a fraction.
fn parse_rgb_channel(s: &str) -> Option<f64> {
    let value = match s.strip_suffix('%') {
        Some(pct) => parse_number(pct.trim())? / 100.0,
        None => parse_number(s)? / 255.0,
    };
    Some(value.clamp(0.0, 1.0))
}

/// A percentage, or a bare number on the same 0..100 scale.
fn parse_fraction(s: &str) -> Option<f64> {
    let value = parse_number(s.strip_suffix('%').unwrap_or(s).trim())?;
    Some((value / 100.0).clamp(0.0, 1.0))
}

fn parse_alpha(s: &str) -> Option<f64> {
    let value = match s.strip_suffix('%') {
        Some(pct) => parse_number(pct.trim())? / 100.0,
        None => parse_number(s)?,
    };
    Some(value.clamp(0.0, 1.0))
}

/// Hue in degrees.
fn parse_hue(s: &str) -> Option<f64> {
    let lower = s.to_ascii_lowercase();
    let (number, scale) = if let Some(v) = lower.strip_suffix("deg") {
        (v, 1.0)
    } else if let Some(v) = lower.strip_suffix("grad") {
        (v, 0.9)
    } else if let Some(v) = lower.strip_suffix("rad") {
        (v, 180.0 / std::f64::consts::PI)
    } else if let Some(v) = lower.strip_suffix("turn") {
        (v, 360.0)
    } else {
        (lower.as_str(), 1.0)
    };
    Some(parse_number(number.trim())? * scale)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    let h = hue.rem_euclid(360.0) / 360.0;
    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

/// Perceptual (HSL) lightness of a CSS color, or `None` if it cannot be
/// parsed.
pub fn lightness(color: &str) -> Option<f64> {
    parse_color(color).map(Rgba::lightness)
}

/// Label color class against a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foreground {
    Dark,
    Light,
}

/// Dark text on fills with lightness >= 0.5, light text otherwise
/// (including fills that cannot be parsed).
pub fn contrast_foreground(fill: &str) -> Foreground {
    match lightness(fill) {
        Some(l) if l >= 0.5 => Foreground::Dark,
        _ => Foreground::Light,
    }
}

/// Per-plate cache of fill color -> label foreground.
#[derive(Debug, Default)]
pub struct LabelPalette {
    cache: HashMap<String, Foreground>,
}

impl LabelPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Foreground for `fill`, computed once per distinct string.
    pub fn foreground(&mut self, fill: &str) -> Foreground {
        if let Some(fg) = self.cache.get(fill) {
            return *fg;
        }
        let fg = contrast_foreground(fill);
        self.cache.insert(fill.to_string(), fg);
        fg
    }

    /// Number of distinct colors cached.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color_rgba("#FF8040"), Some((255, 128, 64, 1.0)));
        assert_eq!(parse_color_rgba("#f80"), Some((255, 136, 0, 1.0)));
        let (r, g, b, a) = parse_color_rgba("#FF000080").unwrap();
        assert_eq!((r, g, b), (255, 0, 0));
        assert!((a - 0.502).abs() < 0.01);
        assert_eq!(parse_color_rgba("#12345"), None);
        assert_eq!(parse_color_rgba("#+f00ff"), None);
    }

    #[test]
    fn test_parse_rgb_and_rgba() {
        assert_eq!(parse_color_rgba("rgb(255, 128, 64)"), Some((255, 128, 64, 1.0)));
        let (_, _, _, a) = parse_color_rgba("rgba(23, 61, 166, 0.66)").unwrap();
        assert!((a - 0.66).abs() < 1e-9);
        assert_eq!(parse_color_rgba("rgb(1, 2)"), None);
    }

    #[test]
    fn test_named_colors_case_insensitive() {
        assert_eq!(parse_color_rgba("Black"), Some((0, 0, 0, 1.0)));
        assert_eq!(parse_color_rgba("white"), Some((255, 255, 255, 1.0)));
        assert_eq!(parse_color_rgba("not-a-color"), None);
    }

    #[test]
    fn test_lightness() {
        assert_eq!(lightness("black"), Some(0.0));
        assert_eq!(lightness("#ffffff"), Some(1.0));
        assert!((lightness("red").unwrap() - 0.5).abs() < 1e-9);
        assert!((lightness("hsl(210, 50%, 30%)").unwrap() - 0.3).abs() < 1e-9);
        assert!((lightness("hsla(0, 0%, 80%, 0.5)").unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_parse_modern_function_syntax() {
        assert_eq!(parse_color_rgba("rgb(255 255 255)"), Some((255, 255, 255, 1.0)));
        assert_eq!(parse_color_rgba("rgb(100%, 100%, 100%)"), Some((255, 255, 255, 1.0)));
        assert_eq!(parse_color_rgba("RGB(0 128 255 / 50%)"), Some((0, 128, 255, 0.5)));
        assert_eq!(parse_color_rgba("rgba(10.4, 20, 30, .25)"), Some((10, 20, 30, 0.25)));
        assert_eq!(parse_color_rgba("hsl(0.5turn 100% 50%)"), Some((0, 255, 255, 1.0)));
        assert_eq!(parse_color_rgba("hsl(120deg, 100%, 25%)"), Some((0, 128, 0, 1.0)));
        let (r, g, b, a) = parse_color_rgba("#0f08").unwrap();
        assert_eq!((r, g, b), (0, 255, 0));
        assert!((a - 136.0 / 255.0).abs() < 1e-9);
        assert_eq!(parse_color_rgba("rgb(1 2)"), None);
        assert_eq!(parse_color_rgba("lab(50% 40 59)"), None);
    }

    #[test]
    fn test_extended_named_colors() {
        assert_eq!(parse_color_rgba("LightBlue"), Some((173, 216, 230, 1.0)));
        assert_eq!(parse_color_rgba("rebeccapurple"), Some((102, 51, 153, 1.0)));
        assert_eq!(parse_color_rgba("transparent"), Some((0, 0, 0, 0.0)));
        assert_eq!(NAMED_COLORS.len(), 148);
    }

    #[test]
    fn test_contrast_foreground() {
        assert_eq!(contrast_foreground("black"), Foreground::Light);
        assert_eq!(contrast_foreground("white"), Foreground::Dark);
        assert_eq!(contrast_foreground("red"), Foreground::Dark);
        assert_eq!(contrast_foreground("navy"), Foreground::Light);
        assert_eq!(contrast_foreground("garbage"), Foreground::Light);
    }

    #[test]
    fn test_palette_caches_per_color() {
        let mut palette = LabelPalette::new();
        assert_eq!(palette.foreground("#000"), Foreground::Light);
        assert_eq!(palette.foreground("#000"), Foreground::Light);
        assert_eq!(palette.foreground("#fff"), Foreground::Dark);
        assert_eq!(palette.len(), 2);
    }
}
