//! EMT Madrid Mobility Labs client.
//!
//! Mobility Labs is the open-data API of Madrid's municipal transport
//! company. It serves both BiciMad (bike-share) and the EMT bus network.
//!
//! Key characteristics:
//! - Every response is wrapped in `{code, description, data}`; HTTP 200
//!   does not imply success, the `code` does
//! - Authentication is an `accessToken` header, either pre-issued or
//!   obtained once by logging in with a client id and passkey
//! - Station records are passed through raw and normalized in `convert`

mod auth;
mod client;
mod convert;
mod error;
mod types;

pub use auth::AuthStrategy;
pub use client::{EmtClient, EmtConfig};
pub use convert::{NormalizeError, normalize_station, normalize_stations};
pub use error::EmtError;
pub use types::{LoginData, MobilityLabsResponse};
