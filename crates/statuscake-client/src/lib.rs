//! # StatusCake Client
//!
//! HTTP client for the SSL test endpoints of the StatusCake API.
//!
//! ## Endpoints
//!
//! - `PUT /SSL/Update`: create (no `id`) or update (with `id`) a test, form encoded
//! - `GET /SSL`: list every SSL test on the account
//! - `DELETE /SSL/Update?id=N`: delete a test
//!
//! Requests are authenticated with the `Username` and `API` headers. The
//! client issues each request once; retry and backoff are left to callers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod client;
pub mod form;
pub mod types;

pub use api::SslApi;
pub use client::{ClientError, StatusCakeClient, StatusCakeClientConfig};
pub use form::encode_form;
pub use types::{PartialSsl, Ssl};
