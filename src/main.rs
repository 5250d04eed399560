use std::process::ExitCode;

use clap::Parser;

use retouch::cli::{self, CliArgs};
use retouch::logger;

fn main() -> ExitCode {
    logger::init();
    cli::run(CliArgs::parse())
}
