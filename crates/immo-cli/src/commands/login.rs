//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use immo::Credentials;

use crate::output;
use crate::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address to authenticate with
    #[arg(long)]
    pub identifier: String,

    /// Account password
    #[arg(long)]
    pub secret: String,
}

pub async fn run(api_url: &str, args: LoginArgs) -> Result<()> {
    let client = storage::build_client(api_url)?;
    let credentials = Credentials::new(&args.identifier, &args.secret);

    eprintln!("{}", "Logging in...".dimmed());

    let session = client.login(credentials).await.context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &session.user.email);
    if let Some(name) = &session.user.display_name {
        output::field("Name", name);
    }
    output::field("Since", &session.created_at.to_rfc3339());

    Ok(())
}
