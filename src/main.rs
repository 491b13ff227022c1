use clap::Parser;
use log::{LevelFilter, debug};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use file2macro::config::{Config, Overwrite};
use file2macro::error::Result;
use file2macro::record::Modifiers;
use file2macro::run::{Conversion, Outcome, run};

/// Convert the content of a file into a Notepad++ macro.
///
/// Check that the hotkey isn't already assigned to a command before putting the
/// output macro inside the shortcuts.xml file.
#[derive(Parser, Debug)]
#[command(name = "file2macro")]
#[command(version)]
#[command(about, long_about)]
struct Cli {
    /// Input file path
    input: PathBuf,

    /// Output file path
    output: PathBuf,

    /// Name of the macro
    name: String,

    /// Key to press to execute the macro (e.g. `a`, `F5`, `page up`)
    key: String,

    /// Hotkey needs the shift key
    #[arg(long)]
    shift: bool,

    /// Hotkey needs the alt key
    #[arg(long)]
    alt: bool,

    /// Hotkey needs the ctrl key
    #[arg(long)]
    ctrl: bool,

    /// Overwrite the output file without asking
    #[arg(short, long)]
    yes: bool,

    /// TOML file with default modifiers and overwrite policy
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log more details (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    return match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
}

fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .init();
}

fn conversion(cli: Cli) -> Result<Conversion> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let flags = Modifiers {
        ctrl: cli.ctrl,
        alt: cli.alt,
        shift: cli.shift,
    };
    return Ok(Conversion {
        input: cli.input,
        output: cli.output,
        name: cli.name,
        key: cli.key,
        modifiers: config.modifiers.union(flags),
        overwrite: if cli.yes {
            Overwrite::Always
        } else {
            config.overwrite
        },
    });
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("{:?}", cli);

    let result = conversion(cli).and_then(|conversion| {
        let stdin = io::stdin();
        return run(&conversion, &mut stdin.lock(), &mut io::stdout());
    });
    return match result {
        Ok(Outcome::Written) | Ok(Outcome::Declined) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    };
}
