//! CLI argument definitions for the Sodality binary.

use std::path::PathBuf;

use clap::Parser;

/// Sodality interactive shell over a persisted social network
#[derive(Parser, Debug)]
#[command(name = "sodality")]
#[command(about = "Sodality: a small social network, one command at a time")]
#[command(version)]
pub struct Cli {
    /// Snapshot file holding the persisted network
    #[arg(
        short = 'D',
        long,
        default_value = "sodality.json",
        env = "SODALITY_DATA_FILE"
    )]
    pub data_file: PathBuf,

    /// Skip saving the snapshot on exit
    #[arg(long)]
    pub no_save: bool,
}
