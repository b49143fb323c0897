use clap::Parser;
use pillarscan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
