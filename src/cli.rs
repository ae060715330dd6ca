use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "countrymgr",
    about = "Interactive console for managing country internet usage and literacy data",
    version,
    author
)]
pub struct Args {
    /// SQLite database file (overrides COUNTRYMGR_DATABASE_PATH)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// JSON file imported when the country table is empty
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn verbosity_level(&self) -> Option<Level> {
        match self.verbose {
            0 => None,
            1 => Some(Level::INFO),
            2 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }
}
