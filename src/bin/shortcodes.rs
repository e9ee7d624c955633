//! Command-line interface for shortcodes
//! This binary is used to inspect shortcode markup: its tokens, the forest built from it, and
//! the normalized template rebuilt from that forest.
//!
//! Usage:
//!   shortcodes tokens `<path>`                          - Print one line per token
//!   shortcodes tree `<path>` [--format `<format>`]      - Print the forest in a registered format
//!   shortcodes template `<path>` [--params `<raw>`]     - Print the rebuilt template of each root node
//!   shortcodes formats                                - List available output formats
//!
//! `-` reads from stdin. `--config <file>` layers a TOML file over the built-in defaults.

use clap::{Arg, ArgAction, ArgMatches, Command};
use shortcodes::shortcodes::config::{Loader, ShortcodesConfig};
use shortcodes::shortcodes::formats::FormatRegistry;
use shortcodes::{build_template, RenderParams, Tokenizer, TreeBuilder};
use std::io::Read;

fn main() {
    let matches = Command::new("shortcodes")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting shortcode markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the default configuration")
                .global(true),
        )
        .arg(
            Arg::new("skip-whitespace")
                .long("skip-whitespace")
                .help("Drop whitespace-only text while building the forest")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the forest built from the input")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'treeviz', 'shortcode', 'json')"),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Print the template rebuilt from each root node")
                .arg(path_arg())
                .arg(
                    Arg::new("params")
                        .long("params")
                        .short('p')
                        .help("Raw parameter text rendered on every tag with children"),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    let config = load_config(&matches);

    match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens_command(&config, path_of(sub)),
        Some(("tree", sub)) => {
            let format = sub.get_one::<String>("format").map(String::as_str);
            handle_tree_command(&config, path_of(sub), format);
        }
        Some(("template", sub)) => {
            let params = sub.get_one::<String>("params").map(String::as_str);
            handle_template_command(&config, path_of(sub), params);
        }
        Some(("formats", _)) => handle_formats_command(&config),
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the input file, or - for stdin")
        .required(true)
        .index(1)
}

fn path_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-")
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, err);
    std::process::exit(1);
}

fn load_config(matches: &ArgMatches) -> ShortcodesConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("skip-whitespace") {
        loader = loader
            .skip_whitespace()
            .unwrap_or_else(|e| fail("Config error", e));
    }
    loader.build().unwrap_or_else(|e| fail("Config error", e))
}

fn read_input(path: &str) -> Vec<u8> {
    let result = if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).map(|_| buf)
    } else {
        std::fs::read(path)
    };
    result.unwrap_or_else(|e| fail("Error reading input", e))
}

fn tokenizer_for(config: &ShortcodesConfig, path: &str) -> Tokenizer {
    Tokenizer::from_input(read_input(path), config.tokenizer)
        .unwrap_or_else(|e| fail("Input error", e))
}

/// Handle the tokens command
fn handle_tokens_command(config: &ShortcodesConfig, path: &str) {
    let tokens = tokenizer_for(config, path)
        .tokens()
        .unwrap_or_else(|e| fail("Tokenizer error", e));
    for token in tokens {
        println!("{:<12} {:>6}  {:?}", token.kind(), token.position(), token.raw());
    }
}

/// Handle the tree command
fn handle_tree_command(config: &ShortcodesConfig, path: &str, format: Option<&str>) {
    let tokens = tokenizer_for(config, path)
        .tokens()
        .unwrap_or_else(|e| fail("Tokenizer error", e));

    let mut builder = TreeBuilder::new(config.tokenizer);
    for token in tokens {
        builder.push(token);
    }
    let (forest, recoveries) = builder.finish();
    if config.tokenizer.strict {
        for recovery in &recoveries {
            eprintln!("warning: {}", recovery);
        }
    }

    let output = FormatRegistry::with_config(&config.output)
        .serialize_or_fallback(&forest, format)
        .unwrap_or_else(|e| fail("Format error", e));
    print!("{}", output);
}

/// Handle the template command
fn handle_template_command(config: &ShortcodesConfig, path: &str, params: Option<&str>) {
    let forest = tokenizer_for(config, path)
        .build_forest()
        .unwrap_or_else(|e| fail("Tokenizer error", e));
    let params = params.map(RenderParams::Raw);
    for node in &forest {
        print!("{}", build_template(node, params));
    }
}

/// Handle the formats command
fn handle_formats_command(config: &ShortcodesConfig) {
    let registry = FormatRegistry::with_config(&config.output);
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry
            .get(&name)
            .map(|f| f.description())
            .unwrap_or_default();
        let marker = if name == registry.fallback() { " (default)" } else { "" };
        println!("  {}{}", name, marker);
        println!("    {}", description);
    }
}
