use clap::Parser;
use cryptoshell::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
