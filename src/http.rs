//! Shared HTTP plumbing for the remote sources

use crate::config::HttpConfig;
use crate::error::UpdateError;
use reqwest::Client;

/// Build the client shared by every source
pub fn build_client(config: &HttpConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// GET `url` and return the body, failing on any non-2xx status
pub async fn get_bytes(client: &Client, url: &str) -> Result<Vec<u8>, UpdateError> {
    let transport = |source: reqwest::Error| UpdateError::Transport {
        url: url.to_string(),
        source,
    };

    tracing::debug!(url = %url, "Fetching");

    let response = client.get(url).send().await.map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpdateError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    Ok(body.to_vec())
}
