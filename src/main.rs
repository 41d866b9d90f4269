use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use qcref::interfaces::input::Input;
use qcref::interfaces::InputHandle;
use qcref::io::read_qcref_yaml;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to a YAML configuration file specifying the reference data to be generated.
    #[arg(short, long)]
    config: PathBuf,

    /// Optional path to a file the main output is to be written to. If not specified, the main
    /// output is written to the console.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use verbose logging. May be specified twice for 'very verbose'.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Logs a nicely formatted QcRef heading to the `qcref-output` logger.
fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    log::info!(target: "qcref-output", "╭──────────────────────────────────────────────────╮");
    log::info!(target: "qcref-output", "│ QcRef {version:<42} │");
    log::info!(target: "qcref-output", "│ Reference integral data for quantum chemistry    │");
    log::info!(target: "qcref-output", "╰──────────────────────────────────────────────────╯");
    log::info!(target: "qcref-output", "");
}

/// Configures the `qcref-output` logger to write the main output either to the console or to a
/// file, and the root logger to report auxiliary messages at a verbosity-dependent level.
fn setup_logging(output: Option<&Path>, verbose: u8) -> Result<(), anyhow::Error> {
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "[{d(%Y-%m-%d %H:%M:%S)}] {h({l})} {t} - {m}{n}",
        )))
        .build();

    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let config_builder = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)));

    let config = if let Some(output_path) = output {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{m}{n}")))
            .append(false)
            .build(output_path)?;
        config_builder
            .appender(Appender::builder().build("qcref_output_file", Box::new(file)))
            .logger(
                Logger::builder()
                    .appender("qcref_output_file")
                    .additive(false)
                    .build("qcref-output", LevelFilter::Info),
            )
            .build(Root::builder().appender("stderr").build(level))?
    } else {
        let console = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{m}{n}")))
            .build();
        config_builder
            .appender(Appender::builder().build("qcref_output_console", Box::new(console)))
            .logger(
                Logger::builder()
                    .appender("qcref_output_console")
                    .additive(false)
                    .build("qcref-output", LevelFilter::Info),
            )
            .build(Root::builder().appender("stderr").build(level))?
    };

    log4rs::init_config(config)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    log_heading();
    let input: Input = read_qcref_yaml(&cli.config)
        .with_context(|| format!("Unable to parse the input file `{}`.", cli.config.display()))?;
    input.handle()
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = setup_logging(cli.output.as_deref(), cli.verbose) {
        eprintln!("Unable to set up logging: {err:#}");
        process::exit(1);
    }
    if let Err(err) = run(&cli) {
        log::error!("{err:#}");
        log::error!(target: "qcref-output", "{err:#}");
        process::exit(1);
    }
}
