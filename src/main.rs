pub mod catalog;
pub mod cli;
pub mod constructs;
pub mod error;
pub mod generator;
pub mod jsii;
pub mod manifest;
pub mod path_de;
pub mod schema;
pub mod serializable;
#[cfg(test)]
mod testing;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    // stdout carries the schema; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
