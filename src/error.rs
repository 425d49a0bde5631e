//! Unified error type.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::ConfigError;

/// The error type returned by appointy's fallible startup and serving
/// operations.
///
/// Request-level failures (400, 404, 500, ...) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures only.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}
