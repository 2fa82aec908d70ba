//! Lifecycle contract invoked by the host engine.

use crate::data::ResourceData;
use crate::schema::{Mode, ResourceSchema, SchemaError};
use async_trait::async_trait;

/// A managed resource type.
///
/// The host validates configuration against [`Resource::schema`] and then
/// calls exactly one lifecycle method at a time per resource instance. Each
/// method runs to completion, including any nested remote calls, before it
/// returns. Implementations keep no state between calls; everything they
/// need arrives in the [`ResourceData`] bag.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Error type surfaced to the host.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Field table for this resource type.
    fn schema(&self) -> &'static ResourceSchema;

    /// Validate a bag against the schema.
    ///
    /// # Errors
    ///
    /// Returns every schema violation found.
    fn validate(&self, data: &ResourceData, mode: Mode) -> Result<(), SchemaError> {
        self.schema().validate(data.attributes(), mode)
    }

    /// Create the remote resource and populate `data` with its state,
    /// including the assigned identifier.
    async fn create(&self, data: &mut ResourceData) -> Result<(), Self::Error>;

    /// Refresh `data` from the remote resource.
    async fn read(&self, data: &mut ResourceData) -> Result<(), Self::Error>;

    /// Push the attributes set in `data` to the remote resource.
    async fn update(&self, data: &mut ResourceData) -> Result<(), Self::Error>;

    /// Delete the remote resource.
    async fn delete(&self, data: &mut ResourceData) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ResourceId;
    use crate::schema::{FieldSchema, ValueType};
    use serde_json::json;

    const SCHEMA: ResourceSchema = ResourceSchema {
        type_name: "echo",
        fields: &[FieldSchema::required("name", ValueType::String)],
    };

    struct Echo;

    #[derive(Debug, thiserror::Error)]
    #[error("echo failed")]
    struct EchoError;

    #[async_trait]
    impl Resource for Echo {
        type Error = EchoError;

        fn schema(&self) -> &'static ResourceSchema {
            &SCHEMA
        }

        async fn create(&self, data: &mut ResourceData) -> Result<(), EchoError> {
            data.set_id(ResourceId::new(1).ok_or(EchoError)?);
            self.read(data).await
        }

        async fn read(&self, data: &mut ResourceData) -> Result<(), EchoError> {
            data.set("seen", true);
            Ok(())
        }

        async fn update(&self, _data: &mut ResourceData) -> Result<(), EchoError> {
            Ok(())
        }

        async fn delete(&self, data: &mut ResourceData) -> Result<(), EchoError> {
            data.id().map(|_| ()).ok_or(EchoError)
        }
    }

    #[test]
    fn default_validate_uses_schema() {
        let data = ResourceData::from_attributes(json!({"name": 1}).as_object().cloned().unwrap());
        assert!(Echo.validate(&data, Mode::Full).is_err());
        assert!(Echo.validate(&ResourceData::new(), Mode::Partial).is_ok());
    }

    #[test]
    fn create_then_delete() {
        let mut data = ResourceData::new();
        tokio_test::block_on(Echo.create(&mut data)).unwrap();
        assert_eq!(data.id().map(ResourceId::get), Some(1));
        assert_eq!(data.get_bool("seen"), Some(true));

        tokio_test::block_on(Echo.delete(&mut data)).unwrap();
    }
}
