//! Driving port reporting whether the patient store is reachable.

use async_trait::async_trait;

use crate::domain::Error;

/// Health check over the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Succeeds when a trivial store round-trip completes.
    async fn check_store(&self) -> Result<(), Error>;
}
