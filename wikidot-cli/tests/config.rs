use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use tempfile::tempdir;

#[test]
fn export_uses_theme_from_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("page.html");
    fs::write(&input_path, "<p>Body</p>").unwrap();

    let config_path = dir.path().join("wikidot.toml");
    fs::write(
        &config_path,
        r#"[theme]
name = "basalt"

[theme.basalt]
dark_mode = true

[export]
better_footnotes = true
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("wikidot");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("wikidot")
        .arg("--config")
        .arg(config_path.as_os_str());

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(
        stdout,
        "[[include :scp-wiki-cn:theme:basalt 版式设置|darkmode=a]]\n\
         [[include :scp-wiki-cn:component:betterfootnotes]]\n\
         Body\n"
    );
}

#[test]
fn extra_params_override_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("page.html");
    fs::write(&input_path, "<p>Body</p>").unwrap();

    let mut cmd = cargo_bin_cmd!("wikidot");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("wikidot")
        .arg("--extra-theme")
        .arg("shivering-night")
        .arg("--extra-city")
        .arg("kl");

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(
        stdout,
        "[[include :scp-wiki-cn:theme:shivering-night kl=*]]\nBody\n"
    );
}

#[test]
fn page_metadata_wins_over_config_for_markup_sources() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("page.wikidot");
    fs::write(
        &input_path,
        "[[include :scp-wiki-cn:theme:black-highlighter-theme]]\nBody\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("wikidot");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("wikidot")
        .arg("--extra-theme")
        .arg("basalt");
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.starts_with("[[include :scp-wiki-cn:theme:black-highlighter-theme]]\n"));
    assert!(!stdout.contains("basalt"));

    let mut cmd = cargo_bin_cmd!("wikidot");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("wikidot")
        .arg("--extra-theme")
        .arg("basalt")
        .arg("--extra-page-metadata")
        .arg("false");
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.starts_with("[[include :scp-wiki-cn:theme:basalt]]\n"));
}

#[test]
fn invalid_boolean_is_rejected() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("page.wikidot");
    fs::write(&input_path, "Body\n").unwrap();

    let mut cmd = cargo_bin_cmd!("wikidot");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("wikidot")
        .arg("--extra-basalt-dark")
        .arg("maybe");
    cmd.assert().failure();
}
