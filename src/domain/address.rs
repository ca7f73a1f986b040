//! Bind address value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidAddressError;

/// Default address the listener binds to
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8042";

/// A validated `host:port` pair.
///
/// The host is kept as written so that names like `localhost` and bracketed
/// IPv6 literals are resolved by the listener. An empty host (`:8042`) binds
/// the IPv6 wildcard, which also accepts IPv4 on dual-stack hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindAddress {
    host: String,
    port: u16,
}

impl Default for BindAddress {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8042,
        }
    }
}

impl FromStr for BindAddress {
    type Err = InvalidAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = || InvalidAddressError {
            input: s.to_string(),
        };

        let (host, port) = input.rsplit_once(':').ok_or_else(invalid)?;
        let port: u16 = port.parse().map_err(|_| invalid())?;

        let host = if host.is_empty() {
            "[::]".to_string()
        } else if host.starts_with('[') {
            if !host.ends_with(']') || host.len() < 3 {
                return Err(invalid());
            }
            host.to_string()
        } else if host.contains(':') || host.contains(char::is_whitespace) {
            // Unbracketed IPv6 literals are ambiguous with the port separator
            return Err(invalid());
        } else {
            host.to_string()
        };

        Ok(Self { host, port })
    }
}

impl fmt::Display for BindAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
