//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{get::GetArgs, login::LoginArgs, logout::LogoutArgs, whoami::WhoamiArgs};

/// CLI for the Immo property-management API.
#[derive(Parser, Debug)]
#[command(name = "immo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL
    #[arg(long, global = true, default_value = "https://api.immo.app")]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new session (login)
    Login(LoginArgs),

    /// End the active session
    Logout(LogoutArgs),

    /// Display the active session
    Whoami(WhoamiArgs),

    /// Perform an authenticated GET and print the payload
    Get(GetArgs),
}
