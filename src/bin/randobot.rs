use clap::Parser;
use cryptoshell::cli::{run_randobot, RandobotCli};

fn main() -> std::process::ExitCode {
    run_randobot(RandobotCli::parse())
}
