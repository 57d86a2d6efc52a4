use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wawa avatar chat backend
#[derive(Debug, Parser)]
#[command(name = "wawa", about = "Chat backend for an animated talking avatar")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "wawa.toml", env = "WAWA_CONFIG", global = true)]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "WAWA_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter, e.g. `info` or `wawa_chat=debug`
    #[arg(long, default_value = "info", env = "WAWA_LOG", global = true)]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an account to the auth user store
    AddUser {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long, default_value = "user")]
        role: String,
    },
}
