//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(api_url: &str, _args: WhoamiArgs) -> Result<()> {
    let client = storage::build_client(api_url)?;
    let session = client
        .store()
        .session()
        .context("No active session. Run 'immo login' first.")?;

    output::field("User", &session.user.email);
    if let Some(name) = &session.user.display_name {
        output::field("Name", name);
    }
    output::field("Id", &session.user.id.to_string());
    output::field("Since", &session.created_at.to_rfc3339());

    Ok(())
}
