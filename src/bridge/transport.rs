//! JSON-RPC transport to the wallet daemon

use crate::config::env_vars::WALLET_BRIDGE_TOKEN;
use crate::{Error, Result};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ArrayParams;
use jsonrpsee::core::ClientError;
use jsonrpsee::http_client::{HeaderMap, HeaderValue, HttpClient, HttpClientBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

pub struct BridgeTransport {
    client: HttpClient,
    url: String,
    token: Option<SecretString>,
}

impl BridgeTransport {
    pub fn new(url: impl Into<String>, token: Option<SecretString>) -> Result<Self> {
        let url = url.into();
        url::Url::parse(&url)
            .map_err(|e| Error::Config(format!("Invalid wallet bridge URL {}: {}", url, e)))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|_| Error::Config("Wallet bridge token is not a valid header".into()))?;
            value.set_sensitive(true);
            headers.insert("authorization", value);
        }

        let client = HttpClientBuilder::default()
            .set_headers(headers)
            .build(&url)
            .map_err(|e| Error::Config(format!("Invalid wallet bridge URL {}: {}", url, e)))?;

        Ok(Self { client, url, token })
    }

    /// Use the bearer token from `WALLET_BRIDGE_TOKEN` when set
    pub fn from_env(url: impl Into<String>) -> Result<Self> {
        let token = std::env::var(WALLET_BRIDGE_TOKEN)
            .ok()
            .filter(|token| !token.is_empty())
            .map(SecretString::from);
        Self::new(url, token)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call a wallet method; wallet-side errors keep their message verbatim
    pub async fn call<R: DeserializeOwned>(&self, method: &str, params: ArrayParams) -> Result<R> {
        self.client
            .request(method, params)
            .await
            .map_err(|e| match e {
                ClientError::Call(error) => Error::Wallet(error.message().to_string()),
                other => Error::Network(other),
            })
    }
}

impl std::fmt::Debug for BridgeTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeTransport")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
