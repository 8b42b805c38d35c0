//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(api_url: &str, _args: LogoutArgs) -> Result<()> {
    let client = storage::build_client(api_url)?;
    client.logout().context("Failed to clear session")?;

    output::success("Logged out");
    Ok(())
}
