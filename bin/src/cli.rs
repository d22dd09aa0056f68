use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rpe", about = "Line-oriented text editing from the command line")]
pub struct Cli {
    /// Config file, overriding the discovered `.rpe/config.toml`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file path or directory
    #[arg(long, global = true, env = "RPE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply a key sequence to a file
    Edit {
        /// File to edit
        path: PathBuf,

        /// Keys in angle-bracket notation, e.g. `abc<Enter><BS><C-End>`
        #[arg(short, long)]
        keys: String,

        /// Print the result without writing it back
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the lines of a file as the buffer splits them
    Inspect {
        /// File to inspect
        path: PathBuf,
    },
}
