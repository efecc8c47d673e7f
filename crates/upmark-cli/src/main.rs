use anyhow::{Context, Result, bail};
use std::{
    env,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process,
};
use upmark_config::Config;
use upmark_engine::io as source_io;

const USAGE: &str = "[--config <path>] [<input>|-]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    /// `None` reads stdin.
    input: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut has_input = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let Some(path) = iter.next() else {
                    bail!("{arg} needs a path");
                };
                parsed.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') && flag != "-" => bail!("unknown option '{flag}'"),
            input => {
                if has_input {
                    bail!("only one input may be given");
                }
                has_input = true;
                if input != "-" {
                    parsed.input = Some(PathBuf::from(input));
                }
            }
        }
    }

    Ok(parsed)
}

/// Explicit config path must exist; the default one is optional.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("config file '{}' not found", path.display())),
        None => {
            let config = Config::load()?;
            if config.is_none() {
                log::debug!(
                    "no config at {}, using defaults",
                    Config::config_path().display()
                );
            }
            Ok(config.unwrap_or_default())
        }
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => Ok(source_io::read_source(path)?),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let text = read_input(args.input.as_deref())?;

    let parser = config.parser();
    log::debug!("rule order: {}", parser.rule_names().join(", "));
    let html = parser.parse(&text).to_html();

    match (&config.output_dir, &args.input) {
        (Some(out_dir), Some(input)) => {
            let out_path = source_io::output_path_for(input, out_dir);
            source_io::write_html(&out_path, &html)?;
            log::info!("wrote {}", out_path.display());
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map_or("upmark", String::as_str);

    let args = match parse_args(argv.get(1..).unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program} {USAGE}");
            process::exit(1);
        }
    };

    run(&args)
}
