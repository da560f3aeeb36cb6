use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use procrastinot::cli::repl;
use procrastinot::model::Registry;

#[derive(Parser)]
#[command(
    name = "pnot",
    about = "A hierarchical to-do manager with a line-oriented command shell",
    version
)]
struct Cli {
    /// Script of commands to run instead of reading stdin
    script: Option<PathBuf>,

    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr; stdout carries command results only. The
    // handle must stay alive for the process lifetime.
    let logger = flexi_logger::Logger::try_with_str(&cli.log).and_then(|logger| logger.start());
    if let Err(error) = &logger {
        eprintln!("warning: logging disabled: {}", error);
    }
    let _logger = logger.ok();

    let mut registry = Registry::new();
    let stdout = io::stdout();
    let result = match &cli.script {
        Some(path) => match File::open(path) {
            Ok(file) => repl::run(&mut registry, BufReader::new(file), stdout.lock()),
            Err(error) => {
                eprintln!("error: cannot open {}: {}", path.display(), error);
                exit(1);
            }
        },
        None => {
            let stdin = io::stdin();
            repl::run(&mut registry, stdin.lock(), stdout.lock())
        }
    };

    if let Err(error) = result {
        eprintln!("error: {}", error);
        exit(1);
    }
}
