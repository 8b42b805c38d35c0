//! Client construction with on-disk session persistence.

use anyhow::{Context, Result};
use directories::ProjectDirs;

use immo::{ApiClient, ApiUrl, FileSessionCache, LogNotifier, SessionStore};

/// Build a client whose session is persisted under the platform data
/// directory, so login state survives between invocations.
pub fn build_client(api_url: &str) -> Result<ApiClient> {
    let base = ApiUrl::new(api_url).context("Invalid API URL")?;

    let dirs =
        ProjectDirs::from("", "", "immo").context("Could not determine config directory")?;
    let cache = FileSessionCache::new(dirs.data_dir().join("session.json"));

    let store = SessionStore::with_cache(Box::new(cache)).context("Failed to load session file")?;

    let client = ApiClient::with_parts(base, store, std::sync::Arc::new(LogNotifier))
        .context("Failed to build API client")?;
    Ok(client)
}
