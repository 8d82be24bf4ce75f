use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Reverse DNS name of the address.
    Host,
    /// Smallest network block strictly containing the address.
    Net,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Host => "host",
            LookupKind::Net => "net",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single key that could not be resolved. Never fatal; the key gets the
/// `N/A` placeholder.
#[derive(Debug, Error)]
pub enum ResolutionFailure {
    #[error("'{key}' is not an IP address")]
    InvalidAddress { key: String },

    #[error("no enclosing network for {addr}")]
    NoSupernet { addr: IpAddr },

    #[error("reverse lookup of {addr} failed: {source}")]
    Lookup {
        addr: IpAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("no reverse record for {addr}")]
    NoName { addr: IpAddr },

    #[error("reverse lookup of {addr} timed out after {timeout:?}")]
    Timeout { addr: IpAddr, timeout: Duration },
}

/// Blocking reverse resolver.
///
/// Called from the blocking thread pool, never from an async task directly.
pub trait HostLookup: Send + Sync + 'static {
    fn reverse(&self, addr: IpAddr) -> Result<String, ResolutionFailure>;
}

/// Reverse resolution through the platform resolver (`getnameinfo`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLookup;

impl HostLookup for SystemLookup {
    fn reverse(&self, addr: IpAddr) -> Result<String, ResolutionFailure> {
        let name = dns_lookup::lookup_addr(&addr)
            .map_err(|source| ResolutionFailure::Lookup { addr, source })?;

        // getnameinfo falls back to the numeric form when there is no PTR record.
        if name.parse::<IpAddr>().is_ok() {
            return Err(ResolutionFailure::NoName { addr });
        }
        Ok(name)
    }
}

pub fn parse_key(key: &str) -> Result<IpAddr, ResolutionFailure> {
    key.trim()
        .parse()
        .map_err(|_| ResolutionFailure::InvalidAddress {
            key: key.to_string(),
        })
}

/// The network one prefix bit shorter than the host route of `key`,
/// e.g. `203.0.113.5` gives `203.0.113.4/31`.
pub fn supernet(key: &str) -> Result<IpNet, ResolutionFailure> {
    let addr = parse_key(key)?;
    IpNet::from(addr)
        .supernet()
        .ok_or(ResolutionFailure::NoSupernet { addr })
}
