//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::storage;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// API path to fetch, e.g. /api/property/list
    pub path: String,
}

pub async fn run(api_url: &str, args: GetArgs) -> Result<()> {
    let client = storage::build_client(api_url)?;

    let payload: serde_json::Value = client
        .get(&args.path)
        .await
        .context("Request failed")?;

    output::json_pretty(&payload)?;
    Ok(())
}
