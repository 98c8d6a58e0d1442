use std::process::ExitCode;

use clap::Parser;

mod commands;
mod error;
mod options;

use commands::Commands;
use error::AppError;
use options::Options;

#[derive(Parser, Debug)]
#[clap(name = "csv-cli")]
#[clap(about = "Inspect and edit delimiter-separated files", long_about = None)]
struct Cli {
    #[clap(flatten)]
    options: Options,

    #[clap(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Cli::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    args.command.run(&args.options, &mut stdout)
}
