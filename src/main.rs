//! Solbuild CLI - multi-project solution builder
//!
//! Entry point for the solbuild command-line application.

use clap::Parser;

use solbuild::cli::output::display_error;
use solbuild::cli::Cli;

fn main() {
    let cli = Cli::parse();
    cli.output_config().apply_global();

    tracing::debug!(
        "solbuild {} ({}{})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        if option_env!("VERGEN_GIT_DIRTY") == Some("true") {
            ", dirty"
        } else {
            ""
        },
    );

    if let Err(e) = cli.run() {
        display_error(&e);
        std::process::exit(1);
    }
}
