use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::Result;

/// Request timeout applied to every Congener HTTP client.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Builds the HTTP client shared by all REST sources.
///
/// PubChem asks automated clients to identify themselves, so the user agent
/// carries the crate name and version.
pub fn build_client() -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("congener/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        assert!(build_client().is_ok());
    }
}
