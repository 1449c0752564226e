use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    Day,
    Night,
}

impl ThemeChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeChoice::Day => "day",
            ThemeChoice::Night => "night",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemeChoice::Day => Palette::DAY,
            ThemeChoice::Night => Palette::NIGHT,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ThemeChoice::Day => ThemeChoice::Night,
            ThemeChoice::Night => ThemeChoice::Day,
        }
    }
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeChoice {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ThemeChoice::Day),
            "night" => Ok(ThemeChoice::Night),
            _ => Err("unknown theme"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.0, self.1, self.2)
    }
}

/// Foreground (`dark`) and background (`light`) colors. Day and night swap them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dark: Rgb,
    pub light: Rgb,
}

impl Palette {
    pub const DAY: Palette = Palette {
        dark: Rgb(10, 10, 20),
        light: Rgb(255, 255, 255),
    };

    pub const NIGHT: Palette = Palette {
        dark: Rgb(255, 255, 255),
        light: Rgb(10, 10, 20),
    };
}
