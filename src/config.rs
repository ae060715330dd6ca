use crate::cli::Args;
use dotenvy::dotenv;
use std::env;
use std::path::{Path, PathBuf};
use tracing::Level;

pub struct Config {
    pub database_path: PathBuf,
    pub seed_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok();

        Ok(Self {
            database_path: env::var("COUNTRYMGR_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/countries.db")),
            seed_file: env::var("COUNTRYMGR_SEED_FILE")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            log_level: env::var("COUNTRYMGR_LOG_LEVEL")
                .unwrap_or_else(|_| "warn".to_string())
                .parse()
                .unwrap_or(Level::WARN),
        })
    }

    /// Command-line values take precedence over the environment.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(path) = &args.database {
            self.database_path = path.clone();
        }
        if let Some(path) = &args.seed {
            self.seed_file = Some(path.clone());
        }
        if let Some(level) = args.verbosity_level() {
            if level > self.log_level {
                self.log_level = level;
            }
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn seed_file(&self) -> Option<&Path> {
        self.seed_file.as_deref()
    }

    pub fn log_level(&self) -> Level {
        self.log_level
    }
}
