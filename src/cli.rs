use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Tool Server - Read-only MySQL tools over JSON-RPC
#[derive(Parser, Debug)]
#[command(name = "sql-tool-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to MySQL and serve tools on stdin/stdout
    Serve {
        /// MySQL connection URL (overrides host/port/user settings)
        #[arg(long)]
        database_url: Option<String>,

        /// Server host
        #[arg(long)]
        host: Option<String>,

        /// Server port
        #[arg(long)]
        port: Option<u16>,

        /// User name
        #[arg(short, long)]
        user: Option<String>,

        /// Password
        #[arg(long)]
        password: Option<String>,

        /// Default database
        #[arg(short, long)]
        database: Option<String>,

        /// Log level or filter directive (logs go to stderr)
        #[arg(long)]
        log_level: Option<String>
    },

    /// Suggest improvements for SQL statements without connecting
    Lint {
        /// Path to SQL file (use - for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
