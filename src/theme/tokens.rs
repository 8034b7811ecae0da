//! Presentation tokens derived from a theme selection

use serde::Serialize;

use crate::models::{Theme, ThemeColors};

/// An HSL colour rendered as `H S% L%`, the form the stylesheet variables take
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}% {}%",
            self.hue.round(),
            (self.saturation * 100.0).round(),
            (self.lightness * 100.0).round()
        )
    }
}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional) into RGB bytes
pub fn parse_hex_color(input: &str) -> Option<[u8; 3]> {
    let hex = input.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let digit = c.to_digit(16)? as u8;
                *slot = digit * 17;
            }
            Some(rgb)
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(hex.get(i * 2..i * 2 + 2)?, 16).ok()?;
            }
            Some(rgb)
        }
        _ => None,
    }
}

/// Convert a hex colour to HSL
pub fn hex_to_hsl(input: &str) -> Option<Hsl> {
    let [r, g, b] = parse_hex_color(input)?;
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if max == min {
        return Some(Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness,
        });
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let hue = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Some(Hsl {
        hue: hue * 60.0,
        saturation,
        lightness,
    })
}

/// Where a token set's values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "theme")]
pub enum TokenSource {
    Builtin(Theme),
    Palette,
}

/// Resolved presentation values handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub theme: Theme,
    pub dark_mode: bool,
    pub source: TokenSource,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub foreground: String,
}

impl TokenSet {
    /// Value for the root element's `data-theme` attribute
    pub fn data_theme(&self) -> &'static str {
        self.theme.as_str()
    }

    /// Stylesheet variables in a fixed order
    pub fn css_variables(&self) -> [(&'static str, &str); 5] {
        [
            ("--primary", &self.primary),
            ("--secondary", &self.secondary),
            ("--accent", &self.accent),
            ("--background", &self.background),
            ("--foreground", &self.foreground),
        ]
    }

    /// A `:root` rule carrying the variables
    pub fn to_css(&self) -> String {
        let body: String = self
            .css_variables()
            .iter()
            .map(|(name, value)| format!("  {}: {};\n", name, value))
            .collect();
        format!(":root {{\n{}}}\n", body)
    }
}

struct Palette {
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    background: &'static str,
    foreground: &'static str,
}

const MODERN: [Palette; 2] = [
    Palette {
        primary: "221 83% 53%",
        secondary: "210 40% 96%",
        accent: "199 89% 48%",
        background: "0 0% 100%",
        foreground: "222 47% 11%",
    },
    Palette {
        primary: "217 91% 60%",
        secondary: "217 33% 17%",
        accent: "199 89% 48%",
        background: "222 47% 11%",
        foreground: "210 40% 98%",
    },
];

const CLASSIC: [Palette; 2] = [
    Palette {
        primary: "38 92% 50%",
        secondary: "48 96% 89%",
        accent: "25 95% 53%",
        background: "48 100% 99%",
        foreground: "24 10% 10%",
    },
    Palette {
        primary: "38 92% 50%",
        secondary: "30 20% 20%",
        accent: "25 95% 53%",
        background: "24 10% 8%",
        foreground: "48 96% 89%",
    },
];

const BOLD: [Palette; 2] = [
    Palette {
        primary: "271 81% 56%",
        secondary: "270 100% 98%",
        accent: "330 81% 60%",
        background: "0 0% 100%",
        foreground: "262 50% 12%",
    },
    Palette {
        primary: "271 91% 65%",
        secondary: "263 40% 20%",
        accent: "330 81% 60%",
        background: "262 50% 7%",
        foreground: "270 100% 98%",
    },
];

const RED_BLACK: [Palette; 2] = [
    Palette {
        primary: "0 84% 60%",
        secondary: "0 0% 90%",
        accent: "0 84% 50%",
        background: "0 0% 100%",
        foreground: "0 0% 20%",
    },
    Palette {
        primary: "0 84% 60%",
        secondary: "0 0% 20%",
        accent: "0 84% 50%",
        background: "0 0% 0%",
        foreground: "0 0% 90%",
    },
];

fn builtin(theme: Theme, dark_mode: bool) -> (Theme, &'static Palette) {
    let table = match theme {
        Theme::Modern => &MODERN,
        Theme::Classic => &CLASSIC,
        Theme::Bold => &BOLD,
        Theme::RedBlack => &RED_BLACK,
        Theme::Custom => return builtin(Theme::default(), dark_mode),
    };
    (theme, &table[usize::from(dark_mode)])
}

fn convert(value: &str) -> String {
    match hex_to_hsl(value) {
        Some(hsl) => hsl.to_string(),
        None => {
            tracing::warn!(colour = %value, "palette colour is not hex, passing it through");
            value.to_string()
        }
    }
}

/// Resolve the token set for a theme.
///
/// `custom` derives every token from the palette; in dark mode the palette's
/// background and text swap roles. `custom` without a palette falls back to
/// the default theme's table.
pub fn resolve_tokens(theme: Theme, palette: Option<&ThemeColors>, dark_mode: bool) -> TokenSet {
    if let (Theme::Custom, Some(colors)) = (theme, palette) {
        let (background, foreground) = if dark_mode {
            (&colors.text, &colors.background)
        } else {
            (&colors.background, &colors.text)
        };
        return TokenSet {
            theme,
            dark_mode,
            source: TokenSource::Palette,
            primary: convert(&colors.primary),
            secondary: convert(&colors.secondary),
            accent: convert(&colors.accent),
            background: convert(background),
            foreground: convert(foreground),
        };
    }

    let (table_theme, palette) = builtin(theme, dark_mode);
    TokenSet {
        theme,
        dark_mode,
        source: TokenSource::Builtin(table_theme),
        primary: palette.primary.to_string(),
        secondary: palette.secondary.to_string(),
        accent: palette.accent.to_string(),
        background: palette.background.to_string(),
        foreground: palette.foreground.to_string(),
    }
}
