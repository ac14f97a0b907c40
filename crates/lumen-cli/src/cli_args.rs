use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "lumen",
    version,
    about = "HTML accessibility and visual-style compliance auditing"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print progress detail to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "5000")]
        port: u16,

        /// SQLite history database path
        #[arg(long, default_value = ".lumen/history.db")]
        db: String,
    },

    /// Audit a local HTML file and print the report as JSON
    Audit {
        /// Path to the HTML file
        file: String,
    },
}
