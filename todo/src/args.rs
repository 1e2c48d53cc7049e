use std::path::PathBuf;

use clap::Parser;

/// Todo API server
#[derive(Debug, Parser)]
#[command(name = "todo", about = "JSON API server for the todo app")]
pub struct Args {
    /// Path to configuration file; without one, `PORT` and
    /// `ALLOWED_ORIGIN` are read from the environment
    #[arg(short, long, env = "TODO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "TODO_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
