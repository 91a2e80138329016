use clap::{Parser, Subcommand};

const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

#[derive(Parser, Debug)]
#[command(name = "network-analytics")]
#[command(about = "Provider network analytics API over a static data snapshot", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Load the data snapshot, report row counts and exit.
    Check(CheckArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Directory holding the JSON tables.
    #[arg(long, env = "DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Origin allowed by CORS; `*` allows any.
    #[arg(long, env = "ALLOW_ORIGIN", default_value = "http://localhost:5173")]
    pub allow_origin: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Directory holding the JSON tables.
    #[arg(long, env = "DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,
}
