mod handlers;
pub mod parse;

use clap::Parser;
pub use parse::Cli;
use tracing_subscriber::EnvFilter;

use crate::core::error::GraphError;

/// Logs go to stderr so chart text on stdout stays clean.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> Result<(), GraphError> {
    let cli = parse::Cli::parse();
    init_logging(cli.debug);
    match cli.cmd {
        parse::Command::Bar(a) => handlers::bar(a),
        parse::Command::Dot(a) => handlers::dot(a),
        parse::Command::Line(a) => handlers::line(a),
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
