use std::{io, net::AddrParseError};

use config::ConfigError;

/// Combined error type for startup and serving errors in the webserver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid listen address: {0}")]
    Address(#[from] AddrParseError),
}

/// The only failure mode of timestamp resolution.
///
/// Never surfaced as an HTTP error: it is folded into the `Invalid Date` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid Date")]
pub struct InvalidDate;
