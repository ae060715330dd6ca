use clap::Parser;
use countrymgr::{
    cli::Args, config::Config, console::controller::Controller,
    initialization::ensure_database_is_ready,
};
use std::io;
use tracing::error;

fn main() {
    let args = Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    config.apply_args(&args);

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(io::stderr)
        .init();

    let db = match ensure_database_is_ready(&config) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to initialize country database: {:#}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut controller = Controller::new(&db, stdin.lock(), stdout.lock());

    if let Err(e) = controller.run() {
        error!("Console loop stopped: {}", e);
    }
}
