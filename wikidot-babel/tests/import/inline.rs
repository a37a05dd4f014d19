use wikidot_babel::{import_document, Tag, ThemeKind};

fn styled_text(markup: &str, tag: Tag) -> String {
    let root = import_document(markup, ThemeKind::None).unwrap();
    let text = root
        .find(&|n| n.tag() == Some(&tag))
        .unwrap_or_else(|| panic!("no {} in import of {markup:?}", tag.name()))
        .text_content();
    text
}

#[test]
fn every_style_pair_wraps_chinese_text() {
    let cases = [
        ("中文**粗体**文字", Tag::Bold, "粗体"),
        ("这是//斜体//", Tag::Italic, "斜体"),
        ("下__划线__", Tag::Underline, "划线"),
        ("已--删除--了", Tag::Strike, "删除"),
        ("上^^标^^", Tag::Superscript, "标"),
        ("下,,标,,文", Tag::Subscript, "标"),
    ];
    for (markup, tag, expected) in cases {
        assert_eq!(styled_text(markup, tag), expected, "markup was {markup:?}");
    }
}

#[test]
fn styles_mix_with_emoji_and_accents() {
    let markup = "é**ü**中//文//😀--x--";
    assert_eq!(styled_text(markup, Tag::Bold), "ü");
    assert_eq!(styled_text(markup, Tag::Italic), "文");
    assert_eq!(styled_text(markup, Tag::Strike), "x");
}

#[test]
fn link_label_and_strike_share_a_line() {
    let root = import_document("[http://x.com 链接] 和 --删除--", ThemeKind::None).unwrap();
    let link = root.find(&|n| n.tag() == Some(&Tag::Link)).unwrap();
    assert_eq!(link.attr("href"), "http://x.com");
    assert_eq!(link.text_content(), "链接");
    assert_eq!(styled_text("[http://x.com 链接] 和 --删除--", Tag::Strike), "删除");
}
