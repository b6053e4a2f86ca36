//! Typed Rust client for the MultiFon telephony API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for the XML wire format, and a small client layer orchestrating requests.
//! Every response carries an embedded result code: an HTTP `200 OK` whose body
//! reports anything other than code 200 is returned as [`MultifonError::Api`].
//!
//! ```rust,no_run
//! use multifon::{Credentials, LineCount, MultifonClient, Routing};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), multifon::MultifonError> {
//!     let client = MultifonClient::new(Credentials::new("79251234567", "...")?)?;
//!     println!("{}", client.get_balance().await?.balance);
//!     client.set_routing(Routing::SipGsm).await?;
//!     client.set_lines(LineCount::new(4)?).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Credentials, DEFAULT_TIMEOUT, MultifonClient, MultifonClientBuilder, MultifonError,
};
pub use domain::{
    Api, BalanceResponse, Endpoint, EndpointTable, Envelope, LineCount, LinesResponse, Login,
    Msisdn, NewPassword, Password, ProfileResponse, Routing, RoutingResponse, Status,
    StatusOnlyResponse, StatusResponse, ValidationError,
};
pub use transport::DecodeError;
