//! Component kinds and their field tables.
//!
//! A component is a specially rendered construct (banner, tab view, license
//! block, ...) as opposed to a generic element. Each kind declares the exact
//! set of attribute fields it carries together with their defaults; the
//! importer fills these from markup and the exporter reads them back.
//!
//!     kind                    element   fields
//!     acs-banner              div       item-number clearance container-class secondary-class
//!                                       secondary-icon disruption-class risk-class animation shivering
//!     aim-header              div       blocks project-id level containment disruption
//!                                       site director researcher task-force
//!     image-block             div       name caption align
//!     image-block-adv         div       name caption width height align
//!     tabview / tab           div       - / title
//!     collapsible             div       show hide
//!     license-box             div       author translator original
//!     file-entry              div       file-name img-name img-author img-license
//!                                       source-link derived-from note
//!     footnote                span      content
//!     user-tag                span      name avatar
//!     dash-escape             span      count
//!     forced-break            p         source
//!     wikidot-table           table     style
//!     ...

use serde::{Deserialize, Serialize};

/// Every semantic component the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    AcsBanner,
    AimHeader,
    ImageBlock,
    ImageBlockAdv,
    Tabview,
    Tab,
    Collapsible,
    LicenseBox,
    FileEntry,
    Footnote,
    HorizontalRule,
    CssModule,
    DivBlock,
    UserTag,
    Toc,
    RateModule,
    RaisaNotice,
    ClassWarning,
    O5Command,
    PageNote,
    EmailExample,
    LoginLogout,
    FoundationBackground,
    WikidotTable,
    AudioPlayer,
    ForcedBreak,
    DashEscape,
}

/// Default email template values, in the language of the wiki branch the
/// skeleton targets.
pub const EMAIL_SHOW_TITLE: &str = "访问SCiPNET邮件？一 (1) 封新邮件！";
pub const EMAIL_HIDE_TITLE: &str = "回复：主题";

impl ComponentKind {
    pub const ALL: [ComponentKind; 27] = [
        ComponentKind::AcsBanner,
        ComponentKind::AimHeader,
        ComponentKind::ImageBlock,
        ComponentKind::ImageBlockAdv,
        ComponentKind::Tabview,
        ComponentKind::Tab,
        ComponentKind::Collapsible,
        ComponentKind::LicenseBox,
        ComponentKind::FileEntry,
        ComponentKind::Footnote,
        ComponentKind::HorizontalRule,
        ComponentKind::CssModule,
        ComponentKind::DivBlock,
        ComponentKind::UserTag,
        ComponentKind::Toc,
        ComponentKind::RateModule,
        ComponentKind::RaisaNotice,
        ComponentKind::ClassWarning,
        ComponentKind::O5Command,
        ComponentKind::PageNote,
        ComponentKind::EmailExample,
        ComponentKind::LoginLogout,
        ComponentKind::FoundationBackground,
        ComponentKind::WikidotTable,
        ComponentKind::AudioPlayer,
        ComponentKind::ForcedBreak,
        ComponentKind::DashEscape,
    ];

    /// The `data-type` marker used in fragments and JSON.
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::AcsBanner => "acs-banner",
            ComponentKind::AimHeader => "aim-header",
            ComponentKind::ImageBlock => "image-block",
            ComponentKind::ImageBlockAdv => "image-block-adv",
            ComponentKind::Tabview => "tabview",
            ComponentKind::Tab => "tab",
            ComponentKind::Collapsible => "collapsible",
            ComponentKind::LicenseBox => "license-box",
            ComponentKind::FileEntry => "file-entry",
            ComponentKind::Footnote => "footnote",
            ComponentKind::HorizontalRule => "horizontal-rule",
            ComponentKind::CssModule => "css-module",
            ComponentKind::DivBlock => "div-block",
            ComponentKind::UserTag => "user-tag",
            ComponentKind::Toc => "toc",
            ComponentKind::RateModule => "rate-module",
            ComponentKind::RaisaNotice => "raisa-notice",
            ComponentKind::ClassWarning => "class-warning",
            ComponentKind::O5Command => "o5-command",
            ComponentKind::PageNote => "page-note",
            ComponentKind::EmailExample => "email-example",
            ComponentKind::LoginLogout => "login-logout",
            ComponentKind::FoundationBackground => "foundation-background",
            ComponentKind::WikidotTable => "wikidot-table",
            ComponentKind::AudioPlayer => "audio-player",
            ComponentKind::ForcedBreak => "forced-break",
            ComponentKind::DashEscape => "dash-escape",
        }
    }

    pub fn from_name(name: &str) -> Option<ComponentKind> {
        ComponentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
    }

    /// Field names with their defaults. The attribute set of a component node
    /// is always exactly this set.
    pub fn fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ComponentKind::AcsBanner => &[
                ("item-number", ""),
                ("clearance", "1"),
                ("container-class", ""),
                ("secondary-class", ""),
                ("secondary-icon", ""),
                ("disruption-class", ""),
                ("risk-class", ""),
                ("animation", "false"),
                ("shivering", "false"),
            ],
            ComponentKind::AimHeader => &[
                ("blocks", "both"),
                ("project-id", ""),
                ("level", ""),
                ("containment", ""),
                ("disruption", ""),
                ("site", ""),
                ("director", ""),
                ("researcher", ""),
                ("task-force", ""),
            ],
            ComponentKind::ImageBlock => &[("name", ""), ("caption", ""), ("align", "right")],
            ComponentKind::ImageBlockAdv => &[
                ("name", ""),
                ("caption", ""),
                ("width", ""),
                ("height", ""),
                ("align", "right"),
            ],
            ComponentKind::Tab => &[("title", "")],
            ComponentKind::Collapsible => &[("show", "+ 展开"), ("hide", "- 折叠")],
            ComponentKind::LicenseBox => {
                &[("author", ""), ("translator", ""), ("original", "false")]
            }
            ComponentKind::FileEntry => &[
                ("file-name", ""),
                ("img-name", ""),
                ("img-author", ""),
                ("img-license", ""),
                ("source-link", ""),
                ("derived-from", ""),
                ("note", ""),
            ],
            ComponentKind::Footnote => &[("content", "")],
            ComponentKind::CssModule => &[("css", "")],
            ComponentKind::DivBlock => &[("params", ""), ("variant", "")],
            ComponentKind::UserTag => &[("name", ""), ("avatar", "true")],
            ComponentKind::RateModule => &[("align", ""), ("hidden", "false")],
            ComponentKind::O5Command => &[("heading", ""), ("body", ""), ("footer", "")],
            ComponentKind::EmailExample => &[
                ("show-title", EMAIL_SHOW_TITLE),
                ("hide-title", EMAIL_HIDE_TITLE),
                ("to-1", "收件人"),
                ("from-1", "发件人"),
                ("subject-1", "主题"),
                ("body-1", "文本"),
                ("to-2", "收件人"),
                ("from-2", "发件人"),
                ("subject-2", "回复：主题"),
                ("body-2", "文本"),
            ],
            ComponentKind::LoginLogout => &[("user-id", "你的ID")],
            ComponentKind::FoundationBackground => &[
                ("title", "标题"),
                ("subtitle", "副标题"),
                ("description", "描述"),
                ("item-number", "XXXX"),
            ],
            ComponentKind::WikidotTable => &[("style", "")],
            ComponentKind::AudioPlayer => &[("url", "")],
            ComponentKind::ForcedBreak => &[("source", "@@@@")],
            ComponentKind::DashEscape => &[("count", "3")],
            ComponentKind::Tabview
            | ComponentKind::HorizontalRule
            | ComponentKind::Toc
            | ComponentKind::RaisaNotice
            | ComponentKind::ClassWarning
            | ComponentKind::PageNote => &[],
        }
    }

    /// Whether the kind renders as a run of inline text rather than a block.
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            ComponentKind::Footnote | ComponentKind::UserTag | ComponentKind::DashEscape
        )
    }

    /// HTML element used to carry the component in an editor fragment.
    pub fn html_tag(self) -> &'static str {
        match self {
            ComponentKind::ForcedBreak => "p",
            ComponentKind::WikidotTable => "table",
            kind if kind.is_inline() => "span",
            _ => "div",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
