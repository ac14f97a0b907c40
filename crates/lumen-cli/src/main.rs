//! lumen CLI — accessibility and visual-style auditing for HTML documents.
//!
//! This binary provides the `lumen` command with subcommands for serving the
//! HTTP API and auditing local HTML files. See `lumen --help` for usage.

use clap::Parser;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Serve { port, db } => commands::serve::run(cli.verbose, port, db),
        Commands::Audit { file } => commands::audit::run(cli.verbose, file),
    };

    std::process::exit(exit_code);
}
