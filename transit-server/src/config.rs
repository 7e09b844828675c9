//! Server configuration from environment variables.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `EMT_API_ACCESS_TOKEN` | Pre-issued Mobility Labs token (skips login) |
//! | `EMT_API_CLIENT_ID`, `EMT_API_PASSKEY` | Login credentials, used when no token is set |
//! | `EMT_API_BASE_URL` | Override the Mobility Labs endpoint |
//! | `GOOGLE_MAPS_API_KEY` | Geocoding API key (required) |
//! | `HOST`, `PORT` | Listen address, default `0.0.0.0:8000` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::emt::AuthStrategy;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Errors while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "no EMT API credentials: set EMT_API_ACCESS_TOKEN, or EMT_API_CLIENT_ID and EMT_API_PASSKEY"
    )]
    MissingCredentials,

    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Everything needed to build the upstream clients and bind the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub auth: AuthStrategy,
    pub google_maps_api_key: String,
    pub emt_base_url: Option<String>,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let auth = match (
            var("EMT_API_ACCESS_TOKEN"),
            var("EMT_API_CLIENT_ID"),
            var("EMT_API_PASSKEY"),
        ) {
            (Some(token), _, _) => AuthStrategy::PreSharedToken(token),
            (None, Some(client_id), Some(passkey)) => {
                AuthStrategy::LoginExchange { client_id, passkey }
            }
            _ => return Err(ConfigError::MissingCredentials),
        };

        let google_maps_api_key =
            var("GOOGLE_MAPS_API_KEY").ok_or(ConfigError::MissingVar("GOOGLE_MAPS_API_KEY"))?;

        let port = match var("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let host = match var("HOST") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "HOST",
                value,
            })?,
            None => DEFAULT_HOST,
        };

        Ok(Self {
            auth,
            google_maps_api_key,
            emt_base_url: var("EMT_API_BASE_URL"),
            bind_addr: SocketAddr::new(host, port),
        })
    }
}
