//! Page themes and product imagery

use serde::Serialize;

/// Brand colour theme selected with `m` (or the legacy `color` key)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Black,
    Green,
    Blue,
    White,
}

/// Colours of one theme, as CSS hex values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub background: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub accent: &'static str,
    pub button: &'static str,
    pub button_hover: &'static str,
    pub button_text: &'static str,
    pub button_text_hover: &'static str,
}

const BLACK: ColorScheme = ColorScheme {
    background: "#000000",
    text: "#FCFF52",
    text_secondary: "#E6E3D5",
    accent: "#1A0329",
    button: "#FCFF52",
    button_hover: "#000000",
    button_text: "#000000",
    button_text_hover: "#FCFF52",
};

const GREEN: ColorScheme = ColorScheme {
    background: "#4E632A",
    text: "#FCFF52",
    text_secondary: "#FBF6F1",
    accent: "#1A0329",
    button: "#FCFF52",
    button_hover: "#4E632A",
    button_text: "#4E632A",
    button_text_hover: "#FCFF52",
};

const BLUE: ColorScheme = ColorScheme {
    background: "#1A0329",
    text: "#8AC0F9",
    text_secondary: "#FBF6F1",
    accent: "#4E632A",
    button: "#8AC0F9",
    button_hover: "#1A0329",
    button_text: "#1A0329",
    button_text_hover: "#8AC0F9",
};

const WHITE: ColorScheme = ColorScheme {
    background: "#FFFFFF",
    text: "#1A0329",
    text_secondary: "#635949",
    accent: "#FCFF52",
    button: "#1A0329",
    button_hover: "#FFFFFF",
    button_text: "#FFFFFF",
    button_text_hover: "#1A0329",
};

impl Theme {
    /// All themes, in help-text order
    pub const ALL: [Theme; 4] = [Theme::Black, Theme::Green, Theme::Blue, Theme::White];

    /// Parse a query value; anything unrecognized falls back to black
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "green" => Theme::Green,
            "blue" => Theme::Blue,
            "white" => Theme::White,
            _ => Theme::Black,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Black => "black",
            Theme::Green => "green",
            Theme::Blue => "blue",
            Theme::White => "white",
        }
    }

    pub fn colors(&self) -> &'static ColorScheme {
        match self {
            Theme::Black => &BLACK,
            Theme::Green => &GREEN,
            Theme::Blue => &BLUE,
            Theme::White => &WHITE,
        }
    }

    /// Product image shipped with the storefront for this theme
    pub fn default_image(&self) -> &'static str {
        match self {
            Theme::Black => "/black.webp",
            Theme::Green => "/green.webp",
            Theme::Blue => "/blue.webp",
            Theme::White => "/white.webp",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the product image comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "lowercase")]
pub enum ImageSource {
    /// Absolute URL, rendered as-is
    Remote(String),
    /// Path served next to the page
    Asset(String),
}

impl ImageSource {
    /// Pick the product image: a value starting with `http` is remote, any other
    /// value is an asset path, and no value means the theme default.
    pub fn select(image: Option<&str>, theme: Theme) -> Self {
        match image {
            Some(src) if src.starts_with("http") => ImageSource::Remote(src.to_string()),
            Some(src) => ImageSource::Asset(src.to_string()),
            None => ImageSource::Asset(theme.default_image().to_string()),
        }
    }

    pub fn src(&self) -> &str {
        match self {
            ImageSource::Remote(src) | ImageSource::Asset(src) => src,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Remote(_))
    }
}
