use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the views accepted by `wikidot inspect` in src/main.rs
const INSPECT_FORMATS: &[&str] = &["treeviz", "json", "html"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let path_arg = |help: &'static str| {
        Arg::new("path")
            .help(help)
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };

    let mut cmd = Command::new("wikidot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting Wikidot pages")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a wikidot.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats")
                .arg(path_arg("Input file path"))
                .arg(Arg::new("from").long("from").value_hint(ValueHint::Other))
                .arg(Arg::new("to").long("to").required(true).value_hint(ValueHint::Other))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the annotated tree of a page")
                .arg(path_arg("Path to the page"))
                .arg(
                    Arg::new("view")
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_FORMATS))
                        .index(2),
                )
                .arg(Arg::new("from").long("from").value_hint(ValueHint::Other)),
        )
        .subcommand(
            Command::new("meta")
                .about("Print page settings found in markup")
                .arg(path_arg("Path to the Wikidot page")),
        );

    generate_to(Bash, &mut cmd, "wikidot", &outdir)?;
    generate_to(Zsh, &mut cmd, "wikidot", &outdir)?;
    generate_to(Fish, &mut cmd, "wikidot", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
