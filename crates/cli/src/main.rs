use anyhow::Result;
use axisdeck_cli::cli::Cli;
use clap::Parser;
use env_logger::init;

fn main() -> Result<()> {
    init();
    Cli::parse().run()
}
