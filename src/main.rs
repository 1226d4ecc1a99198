//! CLI entry point for the circuit diagram editor

use circuit_trainer::io::cli::{Application, Cli};
use circuit_trainer::io::logging;
use clap::Parser;

fn main() -> circuit_trainer::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_directive());
    Application::new(cli).run()
}
