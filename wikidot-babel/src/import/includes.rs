//! Stage 3, first half: page settings and `[[include]]` components.

use super::fragment::component;
use super::patterns::{
    ACS_ANIMATION_RE, ACS_RE, AIM_RE, AUDIO_RE, BETTER_FOOTNOTES_INCLUDE_RE, BETTER_FOOTNOTE_RE,
    CENTERED_IMAGE_RE, CSS_MODULE_RE, FOOTNOTEBLOCK_RE, FOOTNOTE_RE, IMAGE_RE, INCLUDE_HEAD_RE,
    LICENSE_FILES_RE, LICENSE_LINE_RE, LICENSE_RE, RATE_ALIGNED_RE, RATE_RE, SHIVERING_ACS_RE,
    SIDEBAR_INCLUDE_RE, STRAY_LICENSE_RE, THEME_INCLUDE_RE, TOC_RE, USER_RE,
};
use super::{Importer, FAKEPROT_CSS_SIGNATURE, PAGE_CSS_SIGNATURE};
use crate::tree::ComponentKind;
use tracing::debug;

/// Stylesheets that belong to recognized components and are regenerated on
/// export.
const COMPONENT_CSS_SIGNATURES: [&str; 4] = [
    PAGE_CSS_SIGNATURE,
    FAKEPROT_CSS_SIGNATURE,
    ".orderwrapper {position: relative;width: auto;text-align: center;}.council1",
    ".email-example .collapsible-block-folded a.collapsible-block-link",
];

/// A parsed `[[include target |key=value …]]` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeCall {
    pub target: String,
    args: Vec<(String, String)>,
}

impl IncludeCall {
    /// Parses a whole include tag. Keys are lowercased; values are trimmed.
    pub fn parse(source: &str) -> IncludeCall {
        let body = INCLUDE_HEAD_RE.replace(source.trim(), "");
        let body = body.trim_end().trim_end_matches("]]");
        let mut segments = body.split('|');
        let head = segments.next().unwrap_or("").trim();

        let mut call = IncludeCall::default();
        match head.split_once(char::is_whitespace) {
            Some((target, rest)) => {
                call.target = target.to_string();
                call.push_arg(rest);
            }
            None => call.target = head.to_string(),
        }
        for segment in segments {
            call.push_arg(segment);
        }
        call
    }

    fn push_arg(&mut self, segment: &str) {
        if let Some((key, value)) = segment.split_once('=') {
            self.args
                .push((key.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn arg(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }
}

impl Importer {
    pub(super) fn replace_blocks(&mut self, text: &str) -> String {
        let text = self.page_settings(text);
        let text = self.licenses(&text);
        let text = self.acs_banners(&text);
        let text = self.aim_headers(&text);
        let text = self.image_blocks(&text);
        let text = self.tabviews(&text);
        let text = self.login_logout(&text);
        let text = self.advanced_tables(&text);
        let text = self.collapsibles(&text);
        let text = self.generic_divs(&text);
        let text = self.css_modules(&text);
        let text = self.small_includes(&text);
        let text = self.footnotes(&text);
        let text = super::containers::sizes(&text);
        self.alignment(&text)
    }

    /// Rate module, theme and footnote-mode markers. The rate module is
    /// remembered and re-emitted ahead of the body; the rest is page state
    /// read by the metadata scanner.
    fn page_settings(&mut self, text: &str) -> String {
        let text = self.rewrite(text, &RATE_ALIGNED_RE, |this, caps| {
            let align = if &caps[1] == ">" { "right" } else { "left" };
            this.record_rate(align);
            Some(String::new())
        });
        let text = self.rewrite(&text, &RATE_RE, |this, _| {
            this.record_rate("");
            Some(String::new())
        });
        let text = THEME_INCLUDE_RE.replace_all(&text, "");
        let text = SIDEBAR_INCLUDE_RE.replace_all(&text, "");
        let text = BETTER_FOOTNOTES_INCLUDE_RE.replace_all(&text, "");
        FOOTNOTEBLOCK_RE.replace_all(&text, "").into_owned()
    }

    fn record_rate(&mut self, align: &str) {
        if self.rate.is_none() {
            self.rate = Some(component(
                ComponentKind::RateModule,
                &[("align", align)],
                "",
            ));
        }
    }

    fn licenses(&mut self, text: &str) -> String {
        let text = self.rewrite(text, &LICENSE_RE, |this, caps| {
            let params = caps.get(1).map_or("", |m| m.as_str());
            let call = IncludeCall::parse(&format!("[[include license-box{params}]]"));
            let original = call.get("lang").is_some();
            let author = this.field_text(call.arg("author"));
            let translator = this.field_text(call.arg("translator"));

            let files = LICENSE_FILES_RE
                .captures(&caps[2])
                .map(|files| this.file_entries(&files[1]))
                .unwrap_or_default();

            let html = component(
                ComponentKind::LicenseBox,
                &[
                    ("author", author.as_str()),
                    ("translator", translator.as_str()),
                    ("original", if original { "true" } else { "false" }),
                ],
                &files,
            );
            debug!(depth = this.depth, "collected license block");
            this.licenses.push(html);
            Some(String::new())
        });
        STRAY_LICENSE_RE.replace_all(&text, "").into_owned()
    }

    /// File entries are runs of `>` lines separated by blank lines.
    fn file_entries(&self, body: &str) -> String {
        let mut html = String::new();
        let mut fields: Vec<(&str, String)> = Vec::new();
        let lines = body.lines().map(str::trim).chain(std::iter::once(""));
        for line in lines {
            if line.is_empty() {
                if !fields.is_empty() {
                    let borrowed: Vec<(&str, &str)> =
                        fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
                    html.push_str(&component(ComponentKind::FileEntry, &borrowed, ""));
                    fields.clear();
                }
                continue;
            }
            let Some(caps) = LICENSE_LINE_RE.captures(line) else {
                continue;
            };
            let field = match caps[1].trim() {
                "文件名" => "file-name",
                "图像名" => "img-name",
                "图像作者" | "作者" => "img-author",
                "授权协议" => "img-license",
                "来源链接" => "source-link",
                "衍生自" => "derived-from",
                "备注" => "note",
                _ => continue,
            };
            fields.push((field, self.field_text(&caps[2])));
        }
        html
    }

    fn acs_banners(&mut self, text: &str) -> String {
        let text = self.rewrite(text, &SHIVERING_ACS_RE, |this, caps| {
            let animated = caps.get(1).is_some();
            Some(this.acs_banner(&caps[0], &caps[2], animated, true))
        });
        let text = self.rewrite(&text, &ACS_RE, |this, caps| {
            let whole = caps.get(0)?;
            let skip = caps.get(1).map_or(0, |m| m.end() - whole.start());
            Some(this.acs_banner(whole.as_str(), &whole.as_str()[skip..], caps.get(1).is_some(), false))
        });
        ACS_ANIMATION_RE.replace_all(&text, "").into_owned()
    }

    fn acs_banner(&mut self, source: &str, include: &str, animated: bool, shivering: bool) -> String {
        let call = IncludeCall::parse(include);
        let values: Vec<(&str, String)> = [
            "item-number",
            "clearance",
            "container-class",
            "secondary-class",
            "secondary-icon",
            "disruption-class",
            "risk-class",
        ]
        .into_iter()
        .filter_map(|key| call.get(key).map(|value| (key, self.field_text(value))))
        .collect();

        let mut fields: Vec<(&str, &str)> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
        fields.push(("animation", if animated { "true" } else { "false" }));
        fields.push(("shivering", if shivering { "true" } else { "false" }));
        let payload = component(ComponentKind::AcsBanner, &fields, "");
        self.block(source, payload)
    }

    fn aim_headers(&mut self, text: &str) -> String {
        self.rewrite(text, &AIM_RE, |this, caps| {
            let call = IncludeCall::parse(caps[0].trim_end());
            let blocks = match call.arg("blocks") {
                "!" => "bottom-only",
                "-" => "top-only",
                _ => "both",
            };
            let mapping = [
                ("xxxx", "project-id"),
                ("lv", "level"),
                ("cc", "containment"),
                ("dc", "disruption"),
                ("site", "site"),
                ("dir", "director"),
                ("head", "researcher"),
                ("mtf", "task-force"),
            ];
            let values: Vec<(&str, String)> = mapping
                .iter()
                .map(|(key, field)| {
                    let value = call
                        .get(key)
                        .map(|value| this.field_text(value))
                        .unwrap_or_else(|| "???".to_string());
                    (*field, value)
                })
                .collect();
            let mut fields: Vec<(&str, &str)> =
                values.iter().map(|(k, v)| (*k, v.as_str())).collect();
            fields.push(("blocks", blocks));
            let payload = component(ComponentKind::AimHeader, &fields, "");
            Some(this.block(&caps[0], payload))
        })
    }

    fn image_blocks(&mut self, text: &str) -> String {
        let text = self.rewrite(text, &CENTERED_IMAGE_RE, |this, caps| {
            Some(this.image_block(&caps[0], &caps[1], Some("center")))
        });
        self.rewrite(&text, &IMAGE_RE, |this, caps| {
            Some(this.image_block(&caps[0], &caps[0], None))
        })
    }

    fn image_block(&mut self, source: &str, include: &str, align: Option<&str>) -> String {
        let call = IncludeCall::parse(include);
        let name = self.field_text(call.arg("name"));
        let caption = self.field_text(call.arg("caption"));
        let width = self.field_text(call.arg("width"));
        let height = self.field_text(call.arg("height"));
        let align = match align {
            Some(align) => align.to_string(),
            None => match call.get("align") {
                Some(value) if !value.is_empty() => self.field_text(value),
                _ => "right".to_string(),
            },
        };

        let payload = if width.is_empty() && height.is_empty() {
            component(
                ComponentKind::ImageBlock,
                &[("name", name.as_str()), ("caption", caption.as_str()), ("align", align.as_str())],
                "",
            )
        } else {
            component(
                ComponentKind::ImageBlockAdv,
                &[
                    ("name", name.as_str()),
                    ("caption", caption.as_str()),
                    ("width", width.as_str()),
                    ("height", height.as_str()),
                    ("align", align.as_str()),
                ],
                "",
            )
        };
        self.block(source, payload)
    }

    fn css_modules(&mut self, text: &str) -> String {
        self.rewrite(text, &CSS_MODULE_RE, |this, caps| {
            let css = this.field_text(&caps[1]);
            if COMPONENT_CSS_SIGNATURES.iter().any(|sig| css.contains(sig)) {
                return Some(String::new());
            }
            let payload = component(ComponentKind::CssModule, &[("css", css.as_str())], "");
            Some(this.block(&caps[0], payload))
        })
    }

    /// User tags, table-of-contents markers and audio players.
    fn small_includes(&mut self, text: &str) -> String {
        let text = self.rewrite(text, &USER_RE, |this, caps| {
            let name = this.field_text(&caps[2]);
            let avatar = if caps[1].is_empty() { "false" } else { "true" };
            let payload = component(
                ComponentKind::UserTag,
                &[("name", name.as_str()), ("avatar", avatar)],
                "",
            );
            Some(this.inline(&caps[0], payload))
        });
        let text = self.rewrite(&text, &TOC_RE, |this, caps| {
            let payload = component(ComponentKind::Toc, &[], "");
            Some(this.block(&caps[0], payload))
        });
        self.rewrite(&text, &AUDIO_RE, |this, caps| {
            let call = IncludeCall::parse(caps[0].trim_end());
            let url = this.field_text(call.arg("url"));
            let payload = component(ComponentKind::AudioPlayer, &[("url", url.as_str())], "");
            Some(this.block(&caps[0], payload))
        })
    }

    fn footnotes(&mut self, text: &str) -> String {
        let text = self.rewrite(text, &FOOTNOTE_RE, |this, caps| {
            let content = this.field_text(&caps[1]);
            let payload = component(ComponentKind::Footnote, &[("content", content.as_str())], "");
            Some(this.inline(&caps[0], payload))
        });
        self.rewrite(&text, &BETTER_FOOTNOTE_RE, |this, caps| {
            let content = this.field_text(&caps[1]);
            let payload = component(ComponentKind::Footnote, &[("content", content.as_str())], "");
            Some(this.inline(&caps[0], payload))
        })
    }
}
