//! The SSL test operations an adapter needs from the remote service.

use crate::client::ClientError;
use crate::types::{PartialSsl, Ssl};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote SSL test operations.
///
/// The remote API conflates create and update: [`SslApi::upsert`] creates a
/// test when `id` is absent and updates it otherwise. Fields left as `None`
/// are not sent and stay untouched on the remote side.
#[async_trait]
pub trait SslApi: Send + Sync {
    /// Create or update a test, returning its identifier.
    async fn upsert(&self, test: &PartialSsl) -> Result<u64, ClientError>;

    /// Fetch the full record of a test.
    ///
    /// An unknown identifier yields [`ClientError::NotFound`].
    async fn detail(&self, id: u64) -> Result<Ssl, ClientError>;

    /// Delete a test.
    async fn delete(&self, id: u64) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: SslApi + ?Sized> SslApi for Arc<T> {
    async fn upsert(&self, test: &PartialSsl) -> Result<u64, ClientError> {
        (**self).upsert(test).await
    }

    async fn detail(&self, id: u64) -> Result<Ssl, ClientError> {
        (**self).detail(id).await
    }

    async fn delete(&self, id: u64) -> Result<(), ClientError> {
        (**self).delete(id).await
    }
}
