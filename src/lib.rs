//! Typed Rust client for the Clickatell SMS gateway.
//!
//! Two API flavours are supported and selected once, by the shape of the
//! credentials handed to the client:
//! - the legacy HTTP API (query-string requests, `user`/`password`/`api_id`),
//! - the REST API (JSON bodies, bearer token).
//!
//! The crate is split into a domain layer of validated value types, a
//! transport layer that knows the two wire formats, and a small client layer
//! that performs the blocking HTTP exchange and hands back the raw body.
//!
//! ```rust,no_run
//! use clickatell::{Credentials, GatewayClient};
//!
//! fn main() -> Result<(), clickatell::GatewayError> {
//!     let mut client = GatewayClient::builder(Credentials::rest("token", "2517153")?).build()?;
//!     let body = client.send_message("hello", &["2991000000"])?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Credentials, GatewayClient, GatewayClientBuilder, GatewayError, HttpMethod, ResponseSnapshot,
};
pub use domain::{
    ApiId, ApiKey, ApiVariant, MessageId, MessageText, Msisdn, Password, Username,
    ValidationError,
};
pub use transport::url_encode;
