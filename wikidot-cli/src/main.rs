// Command-line interface for wikidot
//
// This binary converts SCP-wiki pages between Wikidot markup, the editor fragment (HTML), a JSON
// dump of the annotated tree and a tree visualization. All the work is done by the wikidot-babel
// crate; this crate only reads files, resolves configuration and prints.
//
// Converting:
//
// The source format is auto-detected from the file extension, and can be overridden by --from.
// Usage:
//  wikidot <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  wikidot convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  wikidot inspect <path> [treeviz|json|html]                                  - Show the tree
//  wikidot meta <path>                                                         - Page settings as JSON
//  wikidot --list-formats                                                      - List formats
//
// Extra Parameters:
//
// Settings can be overridden per run with --extra-<key> [value]. Known keys update the
// configuration (theme, footnote mode, ...); any other key is passed to the target format.
// Example:
//  wikidot page.wikidot --to wikidot --extra-theme basalt --extra-basalt-dark

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wikidot_babel::{scan, FormatRegistry, RenderingState, Theme};
use wikidot_config::{Loader, WikidotConfig, LOCAL_CONFIG_FILE};

const INSPECT_FORMATS: [&str; 3] = ["treeviz", "json", "html"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));
            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("wikidot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting Wikidot pages")
        .long_about(
            "wikidot converts SCP-wiki pages between Wikidot markup and an annotated\n\
            document tree.\n\n\
            Commands:\n  \
            - convert: Transform between formats (wikidot, html, json, treeviz)\n  \
            - inspect: Show the annotated tree of a page\n  \
            - meta:    Print the page settings found in markup\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override settings for one run.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            wikidot page.wikidot --to html                 # Editor fragment to stdout\n  \
            wikidot page.html --to wikidot -o page.wikidot # Back to markup\n  \
            wikidot inspect page.wikidot --extra-attributes"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .value_name("PATH")
                .help("Path to a wikidot.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert pages between formats.\n\n\
                    Supported formats:\n  \
                    - wikidot: Wikidot markup (.wikidot, .wd, .ftml)\n  \
                    - html:    Editor fragment with component markers (.html)\n  \
                    - json:    Annotated tree as JSON (.json)\n  \
                    - treeviz: Tree visualization (output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file."
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the annotated tree of a page")
                .arg(
                    Arg::new("path")
                        .help("Path to the page")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("Output view. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_FORMATS))
                        .index(2),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("meta")
                .about("Print theme, footnote mode, rate module and stylesheets found in markup")
                .arg(
                    Arg::new("path")
                        .help("Path to the Wikidot page")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wikidot_babel=warn,wikidot=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // A bare path as first argument means "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !["convert", "inspect", "meta", "help"].contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("input is required")
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                fail("--to is required")
            };
            let from = resolve_from(input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                fail("path is required")
            };
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            let from = sub_matches
                .get_one::<String>("from")
                .cloned()
                .or_else(|| FormatRegistry::default().detect_format_from_filename(path))
                .unwrap_or_else(|| "wikidot".to_string());
            handle_inspect_command(path, &from, view, &extra_params, &config);
        }
        Some(("meta", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                fail("path is required")
            };
            handle_meta_command(path);
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("reading file '{path}': {e}")))
}

fn resolve_from(input: &str, explicit: Option<&String>) -> String {
    if let Some(from) = explicit {
        return from.clone();
    }
    FormatRegistry::default()
        .detect_format_from_filename(input)
        .unwrap_or_else(|| {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        })
}

/// The configured state, with the page's own settings layered on top when
/// the source is Wikidot markup.
fn rendering_state(config: &WikidotConfig, source: &str, from: &str) -> RenderingState {
    let mut state = config
        .rendering_state()
        .unwrap_or_else(|e| fail(&format!("invalid configuration: {e}")));
    if from == "wikidot" && config.import.use_page_metadata {
        let meta = scan(source);
        if meta.theme != Theme::None {
            state.theme = meta.theme;
        }
        state.better_footnotes |= meta.better_footnotes;
        debug!(?state, "merged page metadata");
    }
    state
}

fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &WikidotConfig,
) {
    let registry = FormatRegistry::default();
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            fail(&e.to_string());
        }
    }

    let source = read_source(input);
    let state = rendering_state(config, &source, from);

    let doc = registry
        .parse(&source, from, &state)
        .unwrap_or_else(|e| fail(&format!("Parse error: {e}")));

    let mut format_options = extra_params.clone();
    if to == "treeviz" && config.inspect.show_attributes {
        format_options.insert("attributes".to_string(), "true".to_string());
    }
    let result = registry
        .serialize_with_options(&doc, to, &state, &format_options)
        .unwrap_or_else(|e| fail(&format!("Serialization error: {e}")));

    match output {
        Some(path) => {
            fs::write(path, result)
                .unwrap_or_else(|e| fail(&format!("writing file '{path}': {e}")));
        }
        None => print!("{result}"),
    }
}

fn handle_inspect_command(
    path: &str,
    from: &str,
    view: &str,
    extra_params: &HashMap<String, String>,
    config: &WikidotConfig,
) {
    let registry = FormatRegistry::default();
    let source = read_source(path);
    let state = rendering_state(config, &source, from);
    let doc = registry
        .parse(&source, from, &state)
        .unwrap_or_else(|e| fail(&format!("Parse error: {e}")));

    let params = build_inspect_params(config, view, extra_params);
    let output = registry
        .serialize_with_options(&doc, view, &state, &params)
        .unwrap_or_else(|e| fail(&format!("Execution error: {e}")));
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
}

fn handle_meta_command(path: &str) {
    let source = read_source(path);
    let meta = scan(&source);
    let json = serde_json::to_string_pretty(&meta)
        .unwrap_or_else(|e| fail(&format!("Serialization error: {e}")));
    println!("{json}");
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let mut directions = Vec::new();
            if format.supports_parsing() {
                directions.push("parse");
            }
            if format.supports_serialization() {
                directions.push("serialize");
            }
            println!(
                "  {name:<10} {:<18} {}",
                directions.join("+"),
                format.description()
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> WikidotConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Moves the known setting keys out of `extra_params` into `config`. Keys
/// left over are format options.
fn apply_config_overrides(config: &mut WikidotConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("better-footnotes") {
        config.export.better_footnotes = parse_bool_arg("better-footnotes", &raw);
    }
    if let Some(name) = extra_params.remove("theme") {
        config.theme.name = name;
    }
    if let Some(city) = extra_params.remove("city") {
        config.theme.city = city;
    }

    let basalt = &mut config.theme.basalt;
    for (key, field) in [
        ("basalt-dark", &mut basalt.dark_mode),
        ("basalt-wide", &mut basalt.wide),
        ("basalt-hide-title", &mut basalt.hide_title),
    ] {
        if let Some(raw) = extra_params.remove(key) {
            *field = parse_bool_arg(key, &raw);
        }
    }

    let bhl = &mut config.theme.black_highlighter;
    for (key, field) in [
        ("bhl-dark-sidebar", &mut bhl.dark_sidebar),
        ("bhl-collapsible-sidebar", &mut bhl.collapsible_sidebar),
        ("bhl-toggle-sidebar", &mut bhl.toggle_sidebar),
        ("bhl-centered-header", &mut bhl.centered_header),
        ("bhl-offices", &mut bhl.offices),
    ] {
        if let Some(raw) = extra_params.remove(key) {
            *field = parse_bool_arg(key, &raw);
        }
    }

    if let Some(raw) = extra_params.remove("page-metadata") {
        config.import.use_page_metadata = parse_bool_arg("page-metadata", &raw);
    }
    if let Some(raw) = extra_params.remove("attributes") {
        config.inspect.show_attributes = parse_bool_arg("attributes", &raw);
    }
}

fn build_inspect_params(
    config: &WikidotConfig,
    view: &str,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if view == "treeviz" && config.inspect.show_attributes {
        params.insert("attributes".to_string(), "true".to_string());
    }
    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }
    params
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
