//! The `statuscake_ssl` resource lifecycle.

use crate::config::{validate_config, SslTestConfig, SslTestPatch};
use crate::schema::{attr, SSL_TEST_SCHEMA};
use crate::state::apply_remote;
use async_trait::async_trait;
use serde_json::Value;
use statuscake_client::{ClientError, SslApi};
use statuscake_core::{
    IdParseError, Mode, Resource, ResourceData, ResourceId, ResourceSchema, SchemaError,
};

/// SSL test resource backed by an [`SslApi`].
#[derive(Debug, Clone)]
pub struct SslTestResource<A> {
    api: A,
}

impl<A: SslApi> SslTestResource<A> {
    /// Create a new adapter over the given API handle.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

/// The test id: the bag's identifier, or else the persisted `id` attribute.
fn resource_id(data: &ResourceData) -> Result<ResourceId, SslTestError> {
    if let Some(id) = data.id() {
        return Ok(id);
    }

    match data.get(attr::ID) {
        Some(Value::String(raw)) => Ok(raw.parse()?),
        Some(other) => Ok(other.to_string().parse()?),
        None => Err(SslTestError::MissingId),
    }
}

#[async_trait]
impl<A: SslApi> Resource for SslTestResource<A> {
    type Error = SslTestError;

    fn schema(&self) -> &'static ResourceSchema {
        &SSL_TEST_SCHEMA
    }

    fn validate(&self, data: &ResourceData, mode: Mode) -> Result<(), SchemaError> {
        validate_config(data, mode)
    }

    async fn create(&self, data: &mut ResourceData) -> Result<(), SslTestError> {
        let config = SslTestConfig::from_data(data)?;

        tracing::debug!(domain = %config.domain, "Creating new StatusCake SSL test");
        let raw_id = self
            .api
            .upsert(&config.to_partial())
            .await
            .map_err(|source| SslTestError::Create { source })?;

        let id = ResourceId::new(raw_id).ok_or_else(|| SslTestError::Create {
            source: ClientError::Parse("service assigned id 0".to_string()),
        })?;
        data.set_id(id);
        tracing::info!(%id, domain = %config.domain, "Created StatusCake SSL test");

        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<(), SslTestError> {
        let id = resource_id(data)?;

        let ssl = self
            .api
            .detail(id.get())
            .await
            .map_err(|source| SslTestError::Read { id, source })?;

        apply_remote(data, &ssl);
        data.set_id(id);
        tracing::debug!(%id, "Read StatusCake SSL test");
        Ok(())
    }

    async fn update(&self, data: &mut ResourceData) -> Result<(), SslTestError> {
        let id = resource_id(data)?;
        let patch = SslTestPatch::from_data(data)?;

        if patch.is_empty() {
            tracing::debug!(%id, "Nothing to update");
            return Ok(());
        }

        tracing::debug!(%id, "StatusCake SSL test update");
        self.api
            .upsert(&patch.to_partial(id))
            .await
            .map_err(|source| SslTestError::Update { id, source })?;

        Ok(())
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<(), SslTestError> {
        let id = resource_id(data)?;

        tracing::debug!(%id, "Deleting StatusCake SSL test");
        self.api
            .delete(id.get())
            .await
            .map_err(|source| SslTestError::Delete { id, source })
    }
}

/// Errors surfaced by the SSL test adapter.
#[derive(Debug, thiserror::Error)]
pub enum SslTestError {
    /// Configuration failed schema validation
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The persisted `id` attribute is not a valid identifier
    #[error(transparent)]
    InvalidId(#[from] IdParseError),
    /// The operation needs an identifier but the resource was never created
    #[error("StatusCake SSL test has no id")]
    MissingId,
    /// Remote create failed
    #[error("error creating StatusCake SSL test")]
    Create {
        /// Client failure
        source: ClientError,
    },
    /// Remote read failed
    #[error("error getting StatusCake SSL test details for {id}")]
    Read {
        /// Target test
        id: ResourceId,
        /// Client failure
        source: ClientError,
    },
    /// Remote update failed
    #[error("error updating StatusCake SSL test {id}")]
    Update {
        /// Target test
        id: ResourceId,
        /// Client failure
        source: ClientError,
    },
    /// Remote delete failed
    #[error("error deleting StatusCake SSL test {id}")]
    Delete {
        /// Target test
        id: ResourceId,
        /// Client failure
        source: ClientError,
    },
}

impl SslTestError {
    /// Whether the remote test no longer exists.
    ///
    /// Hosts use this to drop the resource from state instead of failing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Read { source, .. }
            | Self::Delete { source, .. }
            | Self::Update { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// The underlying client error, if the failure came from the remote API.
    #[must_use]
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Create { source }
            | Self::Read { source, .. }
            | Self::Update { source, .. }
            | Self::Delete { source, .. } => Some(source),
            _ => None,
        }
    }
}
