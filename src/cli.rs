//! Argumentos de línea de comandos. Sin flags se aplica el parche completo.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "multidrop-patch", version, about = "Adds the multi-drop columns to DriverAvailability and Booking")]
pub struct Args {
    /// Print the statements and simulate them in memory without connecting
    #[arg(long)]
    pub dry_run: bool,

    /// Check the catalog (presence and type) for every planned column after the commit
    #[arg(long)]
    pub verify: bool,

    /// Write a JSON report of the run to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}
