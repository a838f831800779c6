use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use tabvault::app::App;
use tabvault::auth;
use tabvault::http_server;
use tabvault::platform;

const DEFAULT_PORT: u16 = 47821;

#[derive(Parser)]
#[command(name = "tabvaultd")]
#[command(about = "Local persistence daemon for the TabVault browser extension", long_about = None)]
#[command(version)]
struct Cli {
    /// Port to listen on (loopback only).
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// SQLite database file. Defaults to the platform data directory.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Run as a native-messaging host (stdin/stdout framing).
    #[arg(long)]
    native: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.native {
        error!("native messaging mode is not implemented; use the HTTP API");
        process::exit(2);
    }

    let token = match auth::load_or_create_token(auth::token_path()) {
        Ok(t) => t,
        Err(e) => {
            error!("failed to load auth token: {}", e);
            process::exit(1);
        }
    };

    let db_path = cli.db.unwrap_or_else(platform::default_db_path);
    info!("opening database at {}", db_path.display());

    let app = match App::new(&db_path, token) {
        Ok(app) => app,
        Err(e) => {
            error!("failed to open database: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = http_server::serve(&app, cli.port) {
        error!("server error: {}", e);
        process::exit(1);
    }
}
