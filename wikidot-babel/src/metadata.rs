//! Page-level settings read straight from raw markup.
//!
//! The scanner only looks for a handful of directives (theme includes, the
//! footnote-mode include, the rate module, stylesheet modules). It never
//! builds a tree and never touches the importer, so it is cheap enough to run
//! before every import to sync the caller's toggles.

use crate::tree::{City, RenderingState, Theme};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static BASALT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[include\s+:scp-wiki-cn:theme:basalt\b([^\]]*)\]\]").unwrap());

static SHIVERING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\[include\s+:scp-wiki-cn:theme:shivering-night(?:-([a-z-]+))?([^\]]*)\]\]").unwrap()
});

static CITY_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\s*=\s*\*").unwrap());

static BLACK_HIGHLIGHTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\[include\s+:scp-wiki-cn:theme:black-highlighter-theme").unwrap());

static RATE_ALIGNED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[\[(<|>)\]\]\s*\[\[module\s+rate\]\]\s*\[\[/(?:<|>)\]\]").unwrap()
});

static RATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[\[module\s+rate\]\]").unwrap());

static CSS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[\[module\s+css\]\](.*?)\[\[/module\]\]").unwrap());

/// Placement of the rating widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateAlign {
    #[default]
    Default,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSettings {
    pub visible: bool,
    pub align: RateAlign,
}

/// Everything [`scan`] finds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub theme: Theme,
    pub better_footnotes: bool,
    pub rate: RateSettings,
    /// Bodies of every CSS module, separated by a blank line.
    pub css: String,
}

impl PageMetadata {
    pub fn rendering_state(&self) -> RenderingState {
        RenderingState::new(self.theme.clone(), self.better_footnotes)
    }
}

/// Scans markup for page-level directives.
pub fn scan(markup: &str) -> PageMetadata {
    let lower = markup.to_lowercase();
    PageMetadata {
        theme: detect_theme(markup, &lower),
        better_footnotes: lower.contains(":scp-wiki-cn:component:betterfootnotes"),
        rate: detect_rate(markup),
        css: CSS_RE
            .captures_iter(markup)
            .map(|caps| caps[1].trim().to_string())
            .filter(|css| !css.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn detect_theme(markup: &str, lower: &str) -> Theme {
    if let Some(caps) = BASALT_RE.captures(markup) {
        let options = caps.get(1).map_or(String::new(), |m| m.as_str().to_lowercase());
        return Theme::Basalt {
            dark_mode: options.contains("darkmode=a"),
            wide: options.contains("wide=a"),
            hide_title: options.contains("hidetitle=a"),
        };
    }
    if let Some(caps) = SHIVERING_RE.captures(markup) {
        let city = caps
            .get(1)
            .and_then(|suffix| City::from_name(suffix.as_str()))
            .or_else(|| {
                let params = caps.get(2)?.as_str();
                CITY_TOKEN_RE
                    .captures_iter(params)
                    .find_map(|token| City::from_name(&token[1]))
            });
        return Theme::ShiveringNight { city };
    }
    if BLACK_HIGHLIGHTER_RE.is_match(markup) {
        return Theme::BlackHighlighter {
            dark_sidebar: lower.contains(":scp-wiki:component:bhl-dark-sidebar"),
            collapsible_sidebar: lower.contains(":scp-wiki:component:collapsible-sidebar"),
            toggle_sidebar: lower.contains(":scp-wiki:component:toggle-sidebar-bhl"),
            centered_header: lower.contains(":scp-wiki:component:centered-header-bhl"),
            offices: lower.contains(":scp-wiki-cn:theme:scp-offices-theme"),
        };
    }
    Theme::None
}

fn detect_rate(markup: &str) -> RateSettings {
    if let Some(caps) = RATE_ALIGNED_RE.captures(markup) {
        let align = if &caps[1] == ">" {
            RateAlign::Right
        } else {
            RateAlign::Left
        };
        return RateSettings {
            visible: true,
            align,
        };
    }
    RateSettings {
        visible: RATE_RE.is_match(markup),
        align: RateAlign::Default,
    }
}
