//! # StatusCake Core
//!
//! The contract between a hosting infrastructure-as-code engine and the
//! StatusCake resource adapters.
//!
//! This crate provides:
//! - A static schema description (field name, type, presence, default)
//! - Validation of a loosely typed attribute bag against that schema
//! - [`ResourceData`], the attribute bag handed to every lifecycle call
//! - [`ResourceId`], the canonical identifier assigned by the remote service
//! - The [`Resource`] lifecycle trait (create, read, update, delete)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod id;
pub mod resource;
pub mod schema;

pub use data::ResourceData;
pub use id::{IdParseError, ResourceId};
pub use resource::Resource;
pub use schema::{
    DefaultValue, Diagnostic, FieldSchema, Mode, Presence, ResourceSchema, SchemaError, ValueType,
};
