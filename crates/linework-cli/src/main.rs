//! Linework CLI - Trace ASCII line drawings into geometric structure

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();
    let app = cli::LineworkApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
