use clap::{Arg, ArgAction, Command};
use dotenv::dotenv;
use replace_bazel_deps::config::LogFormat;
use replace_bazel_deps::{Config, MissingPlaceholder, ReplaceJob, logging};
use std::path::PathBuf;
use std::process;

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let matches = build_cli().get_matches();

    if let Err(e) = run(matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("replace-bazel-deps")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Splice generated dependency declarations into a template")
        .long_about(
            "Replaces the first <generated_bzl_deps/> marker in TEMPLATE with the contents \
             of REPLACEMENT, indented to the marker's column, and writes the result to OUTPUT.",
        )
        .arg(
            Arg::new("template")
                .help("Template file containing the placeholder")
                .required(true)
                .index(1)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("replacement")
                .help("File whose contents replace the placeholder")
                .required(true)
                .index(2)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .help("Output file, created or truncated")
                .required(true)
                .index(3)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("on-missing")
                .long("on-missing")
                .help("What to do when the template has no placeholder")
                .value_parser(["continue", "fail"]),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .help("Log output format")
                .value_parser(["pretty", "compact", "json"]),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (repeatable)")
                .action(ArgAction::Count),
        )
}

fn run(matches: clap::ArgMatches) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if let Some(policy) = matches.get_one::<String>("on-missing") {
        config.substitution.on_missing = policy.parse::<MissingPlaceholder>()?;
    }
    if let Some(format) = matches.get_one::<String>("log-format") {
        config.logging.format = format.parse::<LogFormat>()?;
    }

    logging::init(&config.logging, matches.get_count("verbose"));

    let path = |name: &str| -> anyhow::Result<PathBuf> {
        matches
            .get_one::<PathBuf>(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing argument <{}>", name))
    };
    let job = ReplaceJob::new(path("template")?, path("replacement")?, path("output")?);

    job.run(config.substitution.on_missing)?;

    Ok(())
}
