//! Provider slot
//!
//! The host announces once that it has finished initializing, together with
//! the wallet provider it found (if any). `ProviderSlot::acquire` suspends on
//! that announcement, bounded by a wait window, and caches the provider.

use super::WalletProvider;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Clone)]
enum Availability {
    Pending,
    Ready(Option<Arc<dyn WalletProvider>>),
}

/// Where the session manager obtains its wallet provider
pub struct ProviderSlot {
    rx: watch::Receiver<Availability>,
    cached: Option<Arc<dyn WalletProvider>>,
}

/// Host-side handle that signals readiness exactly once
pub struct ProviderInjector {
    tx: watch::Sender<Availability>,
}

impl ProviderInjector {
    /// Announce that the host is ready, with or without a provider
    pub fn ready(self, provider: Option<Arc<dyn WalletProvider>>) {
        // No receiver left means nobody will ever connect
        let _ = self.tx.send(Availability::Ready(provider));
    }
}

impl ProviderSlot {
    /// Slot whose host is already initialized with a provider
    pub fn ready(provider: Arc<dyn WalletProvider>) -> Self {
        let (_tx, rx) = watch::channel(Availability::Ready(Some(provider)));
        Self { rx, cached: None }
    }

    /// Slot whose host finished initializing without finding a provider
    pub fn missing() -> Self {
        let (_tx, rx) = watch::channel(Availability::Ready(None));
        Self { rx, cached: None }
    }

    /// Slot whose host has not finished initializing yet
    pub fn pending() -> (Self, ProviderInjector) {
        let (tx, rx) = watch::channel(Availability::Pending);
        (Self { rx, cached: None }, ProviderInjector { tx })
    }

    /// Get the provider, waiting at most `wait` for the host to become ready
    pub async fn acquire(&mut self, wait: Duration) -> Result<Arc<dyn WalletProvider>> {
        if let Some(provider) = &self.cached {
            return Ok(Arc::clone(provider));
        }

        let waited = tokio::time::timeout(
            wait,
            self.rx
                .wait_for(|availability| matches!(availability, Availability::Ready(_))),
        )
        .await
        .map(|ready| ready.map(|current| current.clone()));

        let availability = match waited {
            Ok(Ok(availability)) => availability,
            Ok(Err(_)) => {
                return Err(Error::ProviderUnavailable(
                    "host shut down before signalling ready".to_string(),
                ))
            }
            Err(_) => {
                return Err(Error::ProviderUnavailable(format!(
                    "host not ready after {} ms",
                    wait.as_millis()
                )))
            }
        };

        match availability {
            Availability::Ready(Some(provider)) => {
                self.cached = Some(Arc::clone(&provider));
                Ok(provider)
            }
            _ => Err(Error::ProviderUnavailable("wallet not found".to_string())),
        }
    }
}
