//! Fixed markup skeletons for decorative components.
//!
//! These are the community templates the importer recognizes by signature;
//! the style strings and stylesheets must stay byte-for-byte in sync with
//! the signatures in `import`.

pub const RAISA_STYLE: &str = "border: 1px solid #FFC107; background: #FFFEE0; padding: 15px; margin: 10px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); border-radius: 4px; color: #333; font-family: verdana, arial, helvetica, sans-serif; font-size: 14px; line-height: 1.5;";

pub const CLASS_WARNING_STYLE: &str = "background: url(http://scp-wiki.wdfiles.com/local--files/the-great-hippo/scp_trans.png) bottom right no-repeat; border: solid 2px black; padding: 0 20px 20px 20px; margin: 10px auto; width: fit-content; text-align: center; box-shadow: 0 2px 6px rgba(0,0,0,0.2);";

pub const O5_STYLE: &str = "background: url(http://kaktuskontainer.wdfiles.com/local--files/format-hell/scp_trans.png) bottom center no-repeat; text-align: center; width: 600px; margin: 0 auto; font-size: 20px; padding: 0px;";

pub const PAGE_CSS: &str = r#"[[module CSS]]
.page {
    display: block;
    overflow: hidden;
    font-family: "Monotype Corsiva", "Bradley Hand ITC", sans-serif;
    font-style: normal;

    background-attachment: scroll;
    background-clip: border-box;
    background-color: transparent;
    background-image: linear-gradient(to top ,rgb(202, 219, 228) 0%, rgb(231, 233, 220) 8%);
    background-origin: padding-box;
    background-position: 0px 8px;
    background-repeat: repeat;
    background-size: 100% 20px;

    border: 1px solid #CCC;
    border-radius: 10px;
    padding: 10px 10px;
    margin-bottom: 10px;

    box-shadow: 0px 1px 3px rgba(0, 0, 0, 0.2)
    }
.page p,
.page ul {
    line-height: 20px;
    margin: 0;
}
[[/module]]"#;

pub const FAKEPROT_CSS: &str = r#"[[module CSS]]
.fakeprot .mailform-box .buttons{display:none;}
.fakeprot + .collapsible-block .collapsible-block-link {padding: 0.1em 0.5em;text-decoration: none;background-color: #F4F4F4;border: 1px solid #AAA;color: #000;}
.fakeprot + .collapsible-block .collapsible-block-link:hover {background-color: #DDD;color: #000;}
.fakeprot + .collapsible-block .collapsible-block-link:active {background-color: #DDD;color: #000;}
.fakeprot + .collapsible-block .collapsible-block-unfolded-link{margin:0.5em 0;text-align: center;}
.fakeprot + .collapsible-block .collapsible-block-folded{margin:0.5em 0;text-align: center;}
.fakeprot .passw input[type=text] {text-security:disc;-webkit-text-security:disc;-mox-text-security:disc;}
.mailform-box td:first-child {width: 80px;}
[[/module]]"#;

pub const EMAIL_CSS: &str = r#"[[module CSS]]
.email-example .collapsible-block-folded a.collapsible-block-link {
    animation: blink 0.8s ease-in-out infinite alternate;
}
@keyframes blink {
    0% { color: transparent; }
    50%, 100% { color: #b01; }
}
.email {border: solid 2px #000000; width: 88%; padding: 1px 15px; margin: 10px; box-shadow: 0 1px 3px rgba(0,0,0,.5)}
.email-example a.collapsible-block-link {font-weight: bold;}
.tofrom {margin-left: 10px; margin-top: 5px; padding: 1px 15px; border-left: solid 3px maroon}
[[/module]]"#;

pub const FOUNDATION_CSS: &str = "[[module CSS]]\n.orderwrapper {position: relative;width: auto;text-align: center;}.council1 {position: relative;top: 0;bottom: 0;left: 0;right: 0;width: 295px;height: 295px;margin: auto;background-image: url( \"http://kaktuskontainer.wdfiles.com/local--files/format-hell/scp_trans.png\" );background-size: 295px 295px;background-repeat: no-repeat;background-position: center;}.ordertitle {position: absolute;left: 0;right: 0;top: 38px;}.ordertitle h1 {font-size: 220%;color: #555;}.orderdescription {position: absolute;left: 0;right: 0;top: 85px;width: 100%;}.orderdescription p {font-size: 90%;color: #555;}.orderdescription h1 {font-size: 120%;color: #555;}.itemno {position: absolute;left: 0;right: 0;bottom: 27px;}.itemno h1 {font-size: 170%;color: #555;}\n[[/module]]";

/// Fields of one email exchange.
pub struct Email<'a> {
    pub to: &'a str,
    pub from: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

impl Email<'_> {
    fn render(&self) -> String {
        format!(
            "[[div class=\"email\"]]\n[[div class=\"tofrom\"]]\n**至：**{}\n**自：**{}\n**主题：**{}\n[[/div]]\n------\n{}\n[[/div]]",
            self.to, self.from, self.subject, self.body
        )
    }
}

pub fn email_example(show: &str, hide: &str, first: &Email, second: &Email) -> String {
    format!(
        "[[div class=\"email-example\"]]\n[[=]]\n------\n[[collapsible show=\"{show}\" hide=\"{hide}\"]]\n[[<]]\n{}\n@@ @@\n{}\n[[/<]]\n[[/collapsible]]\n[[/=]]\n[[/div]]",
        first.render(),
        second.render()
    )
}

pub fn foundation_background(title: &str, subtitle: &str, description: &str, item: &str) -> String {
    format!(
        "[[div class=\"orderwrapper\"]]\n[[div class=\"council1\"]]\n[[/div]]\n[[div class=\"ordertitle\"]]\n+* {title}\n[[/div]]\n[[div class=\"orderdescription\"]]\n _\n+* {subtitle}\n{description}\n[[/div]]\n[[div class=\"itemno\"]]\n+* {item}\n[[/div]]\n[[/div]]\n\n{FOUNDATION_CSS}"
    )
}

pub fn login_logout(user_id: &str, body: &str) -> String {
    format!(
        "{FAKEPROT_CSS}\n[[div class=\"fakeprot\"]]\n[[module MailForm to=\"aaaa (DUMMY)\" button=\"\"]]\n# name\n * title: ID\n * default: <{user_id}>\n * type: text\n * rules:\n  * required: true\n  * maxLength:10\n  * minLength: 100\n[[/module]]\n[[div class=\"passw\"]]\n[[module MailForm to=\"aaaa (DUMMY)\" button=\"\"]]\n# affiliation\n * title: 密码\n * default: ・・・・・・・・・\n * rules:\n  * required: true\n  * maxLength:10\n  * minLength: 100\n[[/module]]\n[[/div]]\n[[/div]]\n[[collapsible show=\"登入\" hide=\"登出\"]]\n{body}\n[[/collapsible]]"
    )
}

pub fn o5_command(heading: &str, body: &str, footer: &str) -> String {
    let mut out = format!("[[div style=\"{O5_STYLE}\"]]\n@@@@\n@@@@\n@@@@\n@@@@\n[[=]]\n");
    if !heading.is_empty() {
        out.push_str(&format!("++* {heading}\n"));
    }
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
    out.push_str("[[/=]]\n");
    if !footer.is_empty() {
        out.push_str(&format!("= {footer}\n"));
    }
    out.push_str("@@@@\n@@@@\n[[/div]]");
    out
}
