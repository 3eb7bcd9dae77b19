//! Error and Result types for this crate

use std::net::IpAddr;
use thiserror::Error;

/// Errors produced while building or querying address sets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The scope handed to a containment check was cancelled before the
    /// scan finished.
    #[error("parent scope was cancelled")]
    Cancelled,

    /// Two addresses that must share a family did not.
    #[error("address family mismatch: {left} and {right}")]
    FamilyMismatch {
        /// First address
        left: IpAddr,
        /// Second address
        right: IpAddr,
    },

    /// Mask bits are not a contiguous run of ones followed by zeros.
    #[error("invalid network mask: {0}")]
    InvalidMask(IpAddr),

    /// Prefix longer than the address width.
    #[error("invalid prefix length {prefix}, maximum is {max}")]
    InvalidPrefix {
        /// Requested prefix length
        prefix: u8,
        /// Width of the address family
        max: u8,
    },

    /// Range whose start sorts after its end.
    #[error("invalid range: {start} is after {end}")]
    InvalidRange {
        /// First endpoint
        start: IpAddr,
        /// Last endpoint
        end: IpAddr,
    },

    /// Text that is not a network, range or address list.
    #[error("{0}")]
    Parse(String),
}

impl Error {
    pub(crate) fn parse(input: &str, what: &str) -> Self {
        Error::Parse(format!("invalid {} format: {:?}", what, input))
    }
}

/// Result type returned throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
