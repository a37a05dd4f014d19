//! Rendering state threaded through export and import.
//!
//! The state is a plain value: callers build it once per operation (from
//! configuration, CLI flags or scanned page metadata) and pass it in
//! explicitly. Nothing in the converter reads global settings.

use serde::{Deserialize, Serialize};

/// Global toggles that influence output but are not stored on nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderingState {
    pub better_footnotes: bool,
    pub theme: Theme,
}

impl RenderingState {
    pub fn new(theme: Theme, better_footnotes: bool) -> Self {
        RenderingState {
            better_footnotes,
            theme,
        }
    }

    pub fn with_better_footnotes(mut self, enabled: bool) -> Self {
        self.better_footnotes = enabled;
        self
    }
}

/// Active page theme together with its sub-options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    None,
    Basalt {
        dark_mode: bool,
        wide: bool,
        hide_title: bool,
    },
    ShiveringNight {
        city: Option<City>,
    },
    BlackHighlighter {
        dark_sidebar: bool,
        collapsible_sidebar: bool,
        toggle_sidebar: bool,
        centered_header: bool,
        offices: bool,
    },
}

impl Theme {
    pub fn basalt() -> Theme {
        Theme::Basalt {
            dark_mode: false,
            wide: false,
            hide_title: false,
        }
    }

    pub fn black_highlighter() -> Theme {
        Theme::BlackHighlighter {
            dark_sidebar: false,
            collapsible_sidebar: false,
            toggle_sidebar: false,
            centered_header: false,
            offices: false,
        }
    }

    pub fn kind(&self) -> ThemeKind {
        match self {
            Theme::None => ThemeKind::None,
            Theme::Basalt { .. } => ThemeKind::Basalt,
            Theme::ShiveringNight { .. } => ThemeKind::ShiveringNight,
            Theme::BlackHighlighter { .. } => ThemeKind::BlackHighlighter,
        }
    }
}

/// Theme selector without options, as taken by the importer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeKind {
    #[default]
    None,
    Basalt,
    ShiveringNight,
    BlackHighlighter,
}

impl ThemeKind {
    pub fn from_name(name: &str) -> Option<ThemeKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Some(ThemeKind::None),
            "basalt" => Some(ThemeKind::Basalt),
            "shivering-night" | "shivering" => Some(ThemeKind::ShiveringNight),
            "black-highlighter" | "bhl" => Some(ThemeKind::BlackHighlighter),
            _ => None,
        }
    }

    /// The theme with every sub-option switched off.
    pub fn default_theme(self) -> Theme {
        match self {
            ThemeKind::None => Theme::None,
            ThemeKind::Basalt => Theme::basalt(),
            ThemeKind::ShiveringNight => Theme::ShiveringNight { city: None },
            ThemeKind::BlackHighlighter => Theme::black_highlighter(),
        }
    }
}

/// City sub-variant of the shivering-night theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum City {
    Macau,
    KualaLumpur,
    Dublin,
    CapeTown,
    BuenosAires,
}

impl City {
    pub const ALL: [City; 5] = [
        City::Macau,
        City::KualaLumpur,
        City::Dublin,
        City::CapeTown,
        City::BuenosAires,
    ];

    /// Include-parameter token, e.g. `mo` in `mo=*`.
    pub fn token(self) -> &'static str {
        match self {
            City::Macau => "mo",
            City::KualaLumpur => "kl",
            City::Dublin => "dub",
            City::CapeTown => "ct",
            City::BuenosAires => "ba",
        }
    }

    /// Page-name suffix used by the per-city theme pages.
    pub fn page_suffix(self) -> &'static str {
        match self {
            City::Macau => "macau",
            City::KualaLumpur => "kuala-lumpur",
            City::Dublin => "dublin",
            City::CapeTown => "cape-town",
            City::BuenosAires => "buenos-aires",
        }
    }

    pub fn from_name(name: &str) -> Option<City> {
        let name = name.trim().to_ascii_lowercase();
        City::ALL
            .iter()
            .copied()
            .find(|city| city.token() == name || city.page_suffix() == name)
    }
}
