//! # StatusCake SSL Test Adapter
//!
//! Resource adapter mapping a `statuscake_ssl` configuration block onto the
//! StatusCake SSL test API.
//!
//! ## Field mapping
//!
//! Configuration is flat and mostly maps one-to-one onto the remote record.
//! Two fields differ in shape:
//!
//! - `check_rate` is sent and read as `checkrate`
//! - `contact_groups` is a comma-separated string in configuration but an
//!   array in the remote record; reads join it back with `,`
//!
//! Every read also projects the service-computed attributes (certificate and
//! cipher scores, validity window, flags, ...) onto the attribute bag.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod resource;
pub mod schema;
pub mod state;

pub use config::{validate_config, SslTestConfig, SslTestPatch};
pub use resource::{SslTestError, SslTestResource};
pub use schema::SSL_TEST_SCHEMA;
pub use state::apply_remote;
