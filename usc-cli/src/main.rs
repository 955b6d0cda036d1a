//! USC CLI - preprocess raw climate inputs and compare states across years.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "usc-cli",
    version,
    about = "US state climate comparison toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: usc_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    usc_cmd::run(cli.command)
}
